pub mod blocklist;
pub mod customer;
pub mod order;
pub mod order_status;
pub mod product;
pub mod review;

pub use blocklist::*;
pub use customer::*;
pub use order::*;
pub use order_status::*;
pub use product::*;
pub use review::*;
