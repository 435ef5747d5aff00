// Presentational components
//
// Each component renders text lines from its inputs and, at most, a single
// piece of local state. None of them fetch data; pages do that.

pub mod page_meta;
pub mod print_button;
pub mod profile_dropdown;
pub mod sign_in_form;
pub mod switch;
pub mod toaster;

pub use page_meta::PageMeta;
pub use print_button::{FilePrinter, PrintButton, Printer};
pub use profile_dropdown::{DropdownAction, DropdownEntry, ProfileDropdown};
pub use sign_in_form::SignInForm;
pub use switch::Switch;
pub use toaster::Toaster;
