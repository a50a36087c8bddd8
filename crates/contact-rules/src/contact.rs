//! Contact Extraction

use crate::error::ExtractError;
use roxmltree::{Document, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

const CONTACT_EMAIL: &str = "CONTACT_EMAIL";
const NAME: &str = "NAME";
const SHORT_NAME: &str = "SHORT_NAME";
const NOTIFICATIONS: &str = "NOTIFICATIONS";

/// Contact taken from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Tag of the registry item owning the contact (e.g. SITE)
    #[serde(rename = "type")]
    pub contact_type: String,
    pub name: String,
    pub email: String,
}

/// Notification opt-in marker
///
/// Only `TRUE` and `Y` count as opted in; anything else, including an empty
/// marker, opts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFlag {
    OptedIn,
    OptedOut,
}

impl NotificationFlag {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "TRUE" | "Y" => NotificationFlag::OptedIn,
            _ => NotificationFlag::OptedOut,
        }
    }

    pub fn is_opted_in(self) -> bool {
        self == NotificationFlag::OptedIn
    }
}

/// Extraction options
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Accept only contacts whose item carries an opted-in NOTIFICATIONS marker
    pub use_notification_flag: bool,
    /// Replace document emails round-robin with these (non-production runs)
    pub test_emails: Option<Vec<String>>,
}

/// Fields of one registry item, indexed once per item
#[derive(Debug, Default)]
struct ItemFields<'a> {
    tag: &'a str,
    name: Option<&'a str>,
    short_name: Option<&'a str>,
    notifications: Option<&'a str>,
    has_notifications: bool,
}

impl<'a> ItemFields<'a> {
    fn index<'input: 'a>(item: Node<'a, 'input>) -> Self {
        let mut fields = ItemFields {
            tag: item.tag_name().name(),
            ..Default::default()
        };
        for node in item.descendants().skip(1).filter(|n| n.is_element()) {
            match node.tag_name().name() {
                NAME if fields.name.is_none() => fields.name = Some(text_of(node).unwrap_or("")),
                SHORT_NAME if fields.short_name.is_none() => {
                    fields.short_name = Some(text_of(node).unwrap_or(""))
                }
                NOTIFICATIONS if !fields.has_notifications => {
                    fields.has_notifications = true;
                    fields.notifications = text_of(node);
                }
                _ => {}
            }
        }
        fields
    }

    /// NAME when present and non-empty, else SHORT_NAME
    fn display_name(&self) -> Option<&'a str> {
        self.name
            .filter(|n| !n.is_empty())
            .or(self.short_name.filter(|n| !n.is_empty()))
    }

    fn opted_in(&self) -> bool {
        self.notifications
            .map(NotificationFlag::parse)
            .is_some_and(NotificationFlag::is_opted_in)
    }
}

fn text_of<'a, 'input: 'a>(node: Node<'a, 'input>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

/// Extract contacts from a registry XML document, in document order
///
/// An empty document yields no contacts.
pub fn extract_contacts(
    xml: &str,
    options: &ExtractOptions,
) -> Result<Vec<Contact>, ExtractError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc = Document::parse(xml)?;
    let test_emails = options
        .test_emails
        .as_deref()
        .filter(|emails| !emails.is_empty());

    let mut items: HashMap<NodeId, ItemFields> = HashMap::new();
    let mut contacts = Vec::new();

    for email_node in doc.descendants().filter(|n| n.has_tag_name(CONTACT_EMAIL)) {
        let Some(email) = text_of(email_node) else {
            continue;
        };
        let Some(item) = email_node.parent_element() else {
            continue;
        };
        let fields = items
            .entry(item.id())
            .or_insert_with(|| ItemFields::index(item));

        if options.use_notification_flag && !fields.opted_in() {
            debug!("Skipping {} contact {}: not opted in", fields.tag, email);
            continue;
        }

        let Some(name) = fields.display_name() else {
            debug!("Skipping {} contact {}: no name", fields.tag, email);
            continue;
        };

        let email = match test_emails {
            Some(emails) => emails[contacts.len() % emails.len()].clone(),
            None => email.to_string(),
        };

        contacts.push(Contact {
            contact_type: fields.tag.to_string(),
            name: name.to_string(),
            email,
        });
    }

    info!("Extracted {} contacts from registry document", contacts.len());
    Ok(contacts)
}
