pub mod current_user;
pub mod validated_form;

pub use current_user::CurrentUser;
pub use validated_form::ValidatedForm;
