//! Authentication UI module
//!
//! Session context, the route guard and the sign-in/sign-up forms.

mod context;
mod login_form;
mod protected;
mod signup_form;
mod user_menu;

pub use context::{
    AuthContext, BrowserNavigator, ClientBackend, ClientStore, ClientTransport, NavigationBridge,
    provide_auth_context, use_auth_context,
};
pub use login_form::LoginForm;
pub use protected::ProtectedRoute;
pub use signup_form::SignupForm;
pub use user_menu::{UserAvatar, UserMenu};
