pub mod category;
pub mod home;
pub mod search;

pub use category::category_page;
pub use home::home_page;
pub use search::search_page;
