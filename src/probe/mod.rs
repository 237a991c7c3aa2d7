//! Site probe descriptors
//!
//! Each third-party endpoint is described declaratively: how to build the
//! request for an identifier and how to classify the response. The scan
//! orchestrator executes descriptors; nothing here performs I/O.

pub mod registry;

pub use registry::{categories, find_site, sites, sites_for, sites_in_category};

use crate::types::{Status, TargetKind};

/// Probe category, mirroring the catalog's directory-style grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Dev,
    Social,
    Creator,
    Community,
    Gaming,
    Donation,
    Learning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dev => "dev",
            Category::Social => "social",
            Category::Creator => "creator",
            Category::Community => "community",
            Category::Gaming => "gaming",
            Category::Donation => "donation",
            Category::Learning => "learning",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Category::Dev),
            "social" => Ok(Category::Social),
            "creator" => Ok(Category::Creator),
            "community" => Ok(Category::Community),
            "gaming" => Ok(Category::Gaming),
            "donation" => Ok(Category::Donation),
            "learning" => Ok(Category::Learning),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// HTTP method for a probe request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// How to classify a probe response
#[derive(Debug, Clone, Copy)]
pub enum ProbeRule {
    /// Classify purely on the response status code. A status on neither
    /// list is an error; a status on both is a catalog bug and reports as
    /// an error too.
    Status {
        available: &'static [u16],
        taken: &'static [u16],
    },
    /// Classify on response body markers. Non-2xx responses are errors.
    /// When the available marker is absent and no taken marker is given,
    /// the identifier counts as taken.
    BodyContains {
        available: &'static str,
        taken: Option<&'static str>,
    },
}

impl ProbeRule {
    /// Classify a response. Returns the status plus an optional reason for
    /// indeterminate outcomes.
    pub fn classify(&self, status_code: u16, body: &str) -> (Status, Option<String>) {
        match self {
            ProbeRule::Status { available, taken } => {
                let is_available = available.contains(&status_code);
                let is_taken = taken.contains(&status_code);
                match (is_available, is_taken) {
                    (true, true) => (
                        Status::Error,
                        Some("status matched both available and taken".to_string()),
                    ),
                    (true, false) => (Status::Available, None),
                    (false, true) => (Status::Taken, None),
                    (false, false) => (
                        Status::Error,
                        Some(format!("[{status_code}] unexpected status")),
                    ),
                }
            }
            ProbeRule::BodyContains { available, taken } => {
                if !(200..300).contains(&status_code) {
                    return (
                        Status::Error,
                        Some(format!("[{status_code}] unexpected status")),
                    );
                }
                if body.contains(available) {
                    return (Status::Available, None);
                }
                match taken {
                    Some(marker) if body.contains(marker) => (Status::Taken, None),
                    Some(_) => (
                        Status::Error,
                        Some("no response marker matched".to_string()),
                    ),
                    None => (Status::Taken, None),
                }
            }
        }
    }
}

/// Declarative description of one third-party endpoint
#[derive(Debug, Clone, Copy)]
pub struct Site {
    /// Catalog name, unique per target kind
    pub name: &'static str,
    pub category: Category,
    /// Whether this endpoint checks usernames or email addresses
    pub kind: TargetKind,
    /// Request URL template; `{}` is replaced by the identifier
    pub url: &'static str,
    /// Human-facing URL shown with `--show-url`
    pub profile_url: &'static str,
    pub method: HttpMethod,
    /// Extra request headers beyond the shared browser defaults
    pub headers: &'static [(&'static str, &'static str)],
    /// Optional JSON body template; `{}` is replaced by the identifier
    pub body: Option<&'static str>,
    pub rule: ProbeRule,
}

impl Site {
    pub fn request_url(&self, identifier: &str) -> String {
        self.url.replace("{}", identifier)
    }

    pub fn request_body(&self, identifier: &str) -> Option<String> {
        self.body.map(|template| template.replace("{}", identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_RULE: ProbeRule = ProbeRule::Status {
        available: &[404],
        taken: &[200],
    };

    #[test]
    fn test_status_rule_classification() {
        assert_eq!(STATUS_RULE.classify(404, ""), (Status::Available, None));
        assert_eq!(STATUS_RULE.classify(200, ""), (Status::Taken, None));

        let (status, reason) = STATUS_RULE.classify(503, "");
        assert_eq!(status, Status::Error);
        assert!(reason.unwrap().contains("503"));
    }

    #[test]
    fn test_status_rule_overlap_is_error() {
        let rule = ProbeRule::Status {
            available: &[200],
            taken: &[200],
        };
        let (status, reason) = rule.classify(200, "");
        assert_eq!(status, Status::Error);
        assert!(reason.unwrap().contains("both"));
    }

    #[test]
    fn test_body_rule_available_marker() {
        let rule = ProbeRule::BodyContains {
            available: "nobody goes by that name",
            taken: None,
        };
        assert_eq!(
            rule.classify(200, "Sorry, nobody goes by that name."),
            (Status::Available, None)
        );
        assert_eq!(rule.classify(200, "profile page"), (Status::Taken, None));
    }

    #[test]
    fn test_body_rule_taken_marker_required_when_given() {
        let rule = ProbeRule::BodyContains {
            available: "\"valid\":true",
            taken: Some("\"valid\":false"),
        };
        assert_eq!(
            rule.classify(200, "{\"valid\":true}"),
            (Status::Available, None)
        );
        assert_eq!(
            rule.classify(200, "{\"valid\":false}"),
            (Status::Taken, None)
        );
        let (status, _) = rule.classify(200, "{}");
        assert_eq!(status, Status::Error);
    }

    #[test]
    fn test_body_rule_non_success_is_error() {
        let rule = ProbeRule::BodyContains {
            available: "x",
            taken: None,
        };
        let (status, reason) = rule.classify(404, "x");
        assert_eq!(status, Status::Error);
        assert!(reason.unwrap().contains("404"));
    }

    #[test]
    fn test_url_and_body_templates() {
        let site = Site {
            name: "example",
            category: Category::Dev,
            kind: TargetKind::Username,
            url: "https://example.com/users/{}",
            profile_url: "https://example.com",
            method: HttpMethod::Post,
            headers: &[],
            body: Some(r#"{"username":"{}"}"#),
            rule: STATUS_RULE,
        };
        assert_eq!(site.request_url("john"), "https://example.com/users/john");
        assert_eq!(
            site.request_body("john").unwrap(),
            r#"{"username":"john"}"#
        );
    }
}
