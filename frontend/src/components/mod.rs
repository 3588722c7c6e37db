pub mod account_fields;
pub mod header;
pub mod lesson_card;
pub mod lesson_list;
pub mod login_form;
pub mod theme_toggle;
pub mod todo_item;
pub mod todo_list;
