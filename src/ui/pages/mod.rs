//! Application pages module
//!
//! - Home page
//! - Login and signup pages
//! - Dashboard (guarded)
//! - Code playground

mod dashboard;
mod home;
mod layout;
mod login;
mod not_found;
mod playground;
mod signup;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use layout::PageLayout;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use playground::PlaygroundPage;
pub use signup::SignupPage;
