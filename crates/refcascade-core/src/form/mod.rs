//! Form models for the two admin forms the action contributes.
//!
//! These are plain data; rendering and client-side visibility belong to
//! the host.

pub mod preconfig;
pub mod selector;

pub use preconfig::{
    BundleSection, CheckboxGroup, NO_CONTENT_SELECTED, PreconfigurationForm,
    build_preconfiguration_form, view_bundles,
};
pub use selector::{
    FIELD_SELECTOR_KEY, FieldToggle, FormElement, HIDDEN_CLASS, SelectorForm, build_selector_form,
    toggle_selector,
};
