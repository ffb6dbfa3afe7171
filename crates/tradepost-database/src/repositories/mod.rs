//! Repository implementations for all TradePost entities.

pub mod catalog;
pub mod listing;
pub mod message;
pub mod profile;
pub mod role;
pub mod user;

pub use catalog::CatalogRepository;
pub use listing::ListingRepository;
pub use message::MessageRepository;
pub use profile::ProfileRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
