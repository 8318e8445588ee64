pub mod disbursement;
pub mod merchant;
pub mod order;
pub mod ports;
