//! Routing Rule Generation

use crate::contact::Contact;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Field matcher of a routing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleField {
    pub field: String,
    pub regex: String,
}

/// Alert-routing rule for the alerting service's mailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub name: String,
    pub fields: Vec<RuleField>,
    pub contacts: Vec<String>,
    /// Passed through verbatim; its effect is defined by the rule engine
    pub exclude: bool,
}

impl RoutingRule {
    /// Rule matching every resource rooted at the contact's name
    pub fn for_contact(contact: &Contact, extras: &[String]) -> Self {
        let mut contacts = Vec::with_capacity(1 + extras.len());
        contacts.push(contact.email.clone());
        contacts.extend(extras.iter().cloned());

        Self {
            name: format!("rule_{}", contact.name),
            fields: vec![RuleField {
                field: "resource".to_string(),
                regex: format!("^{}($|\\/)", contact.name),
            }],
            contacts,
            exclude: true,
        }
    }
}

/// One rule per contact, in contact order
pub fn generate_rules(contacts: &[Contact], extras: &[String]) -> Vec<RoutingRule> {
    let rules: Vec<RoutingRule> = contacts
        .iter()
        .map(|c| RoutingRule::for_contact(c, extras))
        .collect();
    info!("Generated {} alert rules from contact information", rules.len());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, email: &str) -> Contact {
        Contact {
            contact_type: "SITE".to_string(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_rule_from_contact() {
        let rules = generate_rules(
            &[contact("SITE-A", "a@x.org")],
            &["b@x.org".to_string()],
        );
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.name, "rule_SITE-A");
        assert_eq!(
            rule.fields,
            vec![RuleField {
                field: "resource".to_string(),
                regex: r"^SITE-A($|\/)".to_string(),
            }]
        );
        assert_eq!(rule.contacts, vec!["a@x.org", "b@x.org"]);
        assert!(rule.exclude);
    }

    #[test]
    fn test_rule_json_shape() {
        let rule = RoutingRule::for_contact(&contact("SITE-A", "a@x.org"), &[]);
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(
            json,
            r#"{"name":"rule_SITE-A","fields":[{"field":"resource","regex":"^SITE-A($|\\/)"}],"contacts":["a@x.org"],"exclude":true}"#
        );
    }

    #[test]
    fn test_one_rule_per_contact_in_order() {
        let contacts = vec![contact("B", "b@x.org"), contact("A", "a@x.org")];
        let rules = generate_rules(&contacts, &[]);
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["rule_B", "rule_A"]);
        assert!(generate_rules(&[], &["x@x.org".to_string()]).is_empty());
    }
}
