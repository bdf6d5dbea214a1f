//! Page skeleton and the typed handles the controller works against.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::error::{BoardError, Result};
use crate::order::FormFields;

/// Add overlay handles
#[derive(Debug, Clone, Copy)]
pub struct AddHandles {
    pub overlay: NodeId,
    pub form: NodeId,
    pub title: NodeId,
    pub table: NodeId,
    pub cancel: NodeId,
}

/// Edit overlay handles
#[derive(Debug, Clone, Copy)]
pub struct EditHandles {
    pub overlay: NodeId,
    pub form: NodeId,
    pub title: NodeId,
    pub table: NodeId,
    pub column: NodeId,
    pub cancel: NodeId,
    pub delete: NodeId,
}

/// Help overlay handles
#[derive(Debug, Clone, Copy)]
pub struct HelpHandles {
    pub overlay: NodeId,
    pub cancel: NodeId,
}

/// Header buttons and the order grid
#[derive(Debug, Clone, Copy)]
pub struct OtherHandles {
    pub add: NodeId,
    pub help: NodeId,
    pub grid: NodeId,
}

#[derive(Debug, Clone)]
pub struct PageHandles {
    pub add: AddHandles,
    pub edit: EditHandles,
    pub help: HelpHandles,
    pub other: OtherHandles,
    /// Column name to its `section[data-area]` container
    pub area: BTreeMap<String, NodeId>,
}

impl PageHandles {
    pub fn area(&self, column: &str) -> Result<NodeId> {
        self.area
            .get(column)
            .copied()
            .ok_or_else(|| BoardError::UnknownColumn(column.to_string()))
    }

    pub fn areas(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.area.values().copied()
    }
}

/// Small builder over [`Document`] for laying out static markup
struct Markup<'a> {
    doc: &'a mut Document,
}

impl Markup<'_> {
    fn el(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> Result<NodeId> {
        let node = self.doc.create_element(tag);
        for (name, value) in attrs {
            self.doc.set_attr(node, name, value)?;
        }
        self.doc.append_child(parent, node)?;
        Ok(node)
    }

    fn text(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<NodeId> {
        let node = self.el(parent, tag, attrs)?;
        self.doc.set_text(node, text)?;
        Ok(node)
    }

    fn select<S: AsRef<str>>(
        &mut self,
        parent: NodeId,
        name: &str,
        options: &[S],
    ) -> Result<NodeId> {
        let label = self.text(parent, "label", &[("class", "overlay__field")], &capitalize(name))?;
        let select = self.el(label, "select", &[("class", "overlay__input"), ("name", name)])?;
        for option in options {
            let option = option.as_ref();
            self.text(select, "option", &[("value", option)], &capitalize(option))?;
        }
        if let Some(first) = options.first() {
            self.doc.set_value(select, first.as_ref())?;
        }
        Ok(select)
    }

    fn input(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let label = self.text(parent, "label", &[("class", "overlay__field")], &capitalize(name))?;
        let input = self.el(
            label,
            "input",
            &[("class", "overlay__input"), ("name", name), ("required", "")],
        )?;
        Ok(input)
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the static page for a configuration
pub fn build_page(config: &Config) -> Result<(Document, PageHandles)> {
    let mut doc = Document::new();
    let root = doc.root();
    let mut m = Markup { doc: &mut doc };

    let header = m.el(root, "header", &[("class", "header")])?;
    m.text(header, "h1", &[("class", "header__title")], "Orders")?;
    let help_button = m.text(header, "button", &[("class", "button"), ("data-help", "")], "?")?;
    let add_button = m.text(
        header,
        "button",
        &[("class", "button"), ("data-add", "")],
        "Add Order",
    )?;

    let grid = m.el(root, "main", &[("class", "grid"), ("data-grid", "")])?;
    let mut area = BTreeMap::new();
    for column in &config.columns {
        let section = m.el(
            grid,
            "section",
            &[("class", "grid__column"), ("data-area", column.as_str())],
        )?;
        m.text(section, "h2", &[("class", "grid__heading")], &capitalize(column))?;
        area.insert(column.clone(), section);
    }

    let overlay = m.el(root, "dialog", &[("class", "overlay"), ("data-add-overlay", "")])?;
    let form = m.el(overlay, "form", &[("class", "overlay__form"), ("data-add-form", "")])?;
    m.text(form, "h2", &[("class", "overlay__title")], "Add Order")?;
    let title = m.input(form, FormFields::TITLE)?;
    let table = m.select(form, FormFields::TABLE, config.tables.as_slice())?;
    m.text(form, "button", &[("class", "button"), ("type", "submit")], "Add")?;
    let cancel = m.text(
        form,
        "button",
        &[("class", "button"), ("data-add-cancel", ""), ("type", "button")],
        "Cancel",
    )?;
    let add = AddHandles {
        overlay,
        form,
        title,
        table,
        cancel,
    };

    let overlay = m.el(root, "dialog", &[("class", "overlay"), ("data-edit-overlay", "")])?;
    let form = m.el(overlay, "form", &[("class", "overlay__form"), ("data-edit-form", "")])?;
    m.text(form, "h2", &[("class", "overlay__title")], "Edit Order")?;
    let title = m.input(form, FormFields::TITLE)?;
    let table = m.select(form, FormFields::TABLE, config.tables.as_slice())?;
    let column = m.select(form, FormFields::COLUMN, config.columns.as_slice())?;
    let delete = m.text(
        form,
        "button",
        &[("class", "button"), ("data-edit-delete", ""), ("type", "button")],
        "Delete",
    )?;
    let cancel = m.text(
        form,
        "button",
        &[("class", "button"), ("data-edit-cancel", ""), ("type", "button")],
        "Cancel",
    )?;
    m.text(form, "button", &[("class", "button"), ("type", "submit")], "Save")?;
    let edit = EditHandles {
        overlay,
        form,
        title,
        table,
        column,
        cancel,
        delete,
    };

    let overlay = m.el(root, "dialog", &[("class", "overlay"), ("data-help-overlay", "")])?;
    m.text(overlay, "h2", &[("class", "overlay__title")], "Help")?;
    m.text(
        overlay,
        "p",
        &[("class", "overlay__text")],
        "Drag orders between columns to update their stage. Click an order to edit or delete it.",
    )?;
    let cancel = m.text(
        overlay,
        "button",
        &[("class", "button"), ("data-help-cancel", ""), ("type", "button")],
        "Close",
    )?;
    let help = HelpHandles { overlay, cancel };

    let handles = PageHandles {
        add,
        edit,
        help,
        other: OtherHandles {
            add: add_button,
            help: help_button,
            grid,
        },
        area,
    };

    Ok((doc, handles))
}
