pub mod list;

pub use list::LocationsPage;
