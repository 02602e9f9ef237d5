pub mod authenticated;
pub mod options;

pub use authenticated::AuthenticatedClient;
pub use options::RequestOptions;
