use crate::{model::BundleRef, whitelist::Whitelist};
use std::collections::BTreeSet;

/// Form key reserved for the selector itself.
pub const FIELD_SELECTOR_KEY: &str = "_field_selector";

/// Wrapper class that visually hides a toggle without removing it.
pub const HIDDEN_CLASS: &str = "vbo-ref-hidden";

const SELECTOR_TITLE: &str = "Select fields to change";
const SELECTOR_EMPTY_TITLE: &str = "There are no fields available to modify";
const SELECTOR_WEIGHT: i32 = -50;

///
/// FormElement
///
/// One top-level element of the host's entity edit form, as far as the
/// selector cares about it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormElement {
    pub key: String,
    pub title: String,
    pub weight: Option<i32>,
    /// Explicit access flag; `None` means accessible.
    pub access: Option<bool>,
    /// False when the element carries no editable widget.
    pub has_widget: bool,
    pub required: bool,
    /// Visibility condition: the element shows only while this checkbox
    /// selector is checked.
    pub visible_when: Option<String>,
}

impl FormElement {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            weight: None,
            access: None,
            has_widget: true,
            required: false,
            visible_when: None,
        }
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub const fn with_access(mut self, access: bool) -> Self {
        self.access = Some(access);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn without_widget(mut self) -> Self {
        self.has_widget = false;
        self
    }
}

///
/// FieldToggle
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldToggle {
    pub key: String,
    pub title: String,
    pub weight: i32,
    /// Rendered but hidden through [`HIDDEN_CLASS`].
    pub hidden: bool,
}

///
/// SelectorForm
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectorForm {
    pub title: String,
    pub weight: i32,
    pub toggles: Vec<FieldToggle>,
}

impl SelectorForm {
    #[must_use]
    pub fn toggle(&self, key: &str) -> Option<&FieldToggle> {
        self.toggles.iter().find(|t| t.key == key)
    }

    /// Toggles the operator can actually see.
    pub fn visible_toggles(&self) -> impl Iterator<Item = &FieldToggle> {
        self.toggles.iter().filter(|t| !t.hidden)
    }

    /// Wrapper classes for one toggle.
    #[must_use]
    pub fn wrapper_classes(toggle: &FieldToggle) -> Vec<&'static str> {
        if toggle.hidden {
            vec![HIDDEN_CLASS]
        } else {
            Vec::new()
        }
    }
}

/// Checkbox selector path for one field toggle.
#[must_use]
pub fn toggle_selector(entity_type: &str, bundle: &str, key: &str) -> String {
    format!(r#"[name="{entity_type}[{bundle}][{FIELD_SELECTOR_KEY}][{key}]"]"#)
}

/// Build the per-field selector for one bundle's entity edit form.
///
/// Every accessible element with a widget gets a toggle and a visibility
/// condition tied to it; elements outside the whitelist keep their toggle
/// but hidden, so nothing disappears from the form.
#[must_use]
pub fn build_selector_form(
    entity_type: &str,
    bundle: &str,
    whitelist: &Whitelist,
    elements: &mut [FormElement],
) -> SelectorForm {
    let empty = BTreeSet::new();
    let whitelisted = whitelist
        .fields(&BundleRef::new(entity_type, bundle))
        .unwrap_or(&empty);

    let mut toggles = Vec::new();
    let mut exposed = 0usize;

    for element in elements.iter_mut() {
        if element.access == Some(false)
            || element.key == FIELD_SELECTOR_KEY
            || !element.has_widget
        {
            continue;
        }

        element.required = false;
        element.visible_when = Some(toggle_selector(entity_type, bundle, &element.key));

        let hidden = !whitelisted.contains(&element.key);
        if !hidden {
            exposed += 1;
        }

        toggles.push(FieldToggle {
            key: element.key.clone(),
            title: element.title.clone(),
            weight: element.weight.unwrap_or(0),
            hidden,
        });
    }

    let title = if exposed == 0 {
        SELECTOR_EMPTY_TITLE
    } else {
        SELECTOR_TITLE
    };

    SelectorForm {
        title: title.to_string(),
        weight: SELECTOR_WEIGHT,
        toggles,
    }
}

///
/// TESTS
///
