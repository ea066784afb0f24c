pub mod contact_form;
pub mod reviews_section;
