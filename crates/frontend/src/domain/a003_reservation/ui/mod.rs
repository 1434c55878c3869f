pub mod history;
pub mod wizard;

pub use history::HistoryPage;
pub use wizard::ReservationWizardPage;
