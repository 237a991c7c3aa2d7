//! Static catalog of site probes
//!
//! URLs and classification rules follow each site's public signup or
//! profile endpoint. Sites come and go and occasionally change their
//! responses; a stale entry degrades to `Status::Error`, never to a wrong
//! answer, because unexpected responses are always indeterminate.

use super::{Category, HttpMethod, ProbeRule, Site};
use crate::types::TargetKind;

const STATUS_404_200: ProbeRule = ProbeRule::Status {
    available: &[404],
    taken: &[200],
};

static SITES: &[Site] = &[
    // -- dev ---------------------------------------------------------------
    Site {
        name: "github",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://github.com/signup_check/username?value={}",
        profile_url: "https://github.com",
        method: HttpMethod::Get,
        headers: &[("sec-fetch-site", "same-origin")],
        body: None,
        rule: ProbeRule::Status {
            available: &[200],
            taken: &[422],
        },
    },
    Site {
        name: "codeberg",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://codeberg.org/{}",
        profile_url: "https://codeberg.org",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "dockerhub",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://hub.docker.com/v2/users/{}/",
        profile_url: "https://hub.docker.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "huggingface",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://huggingface.co/{}",
        profile_url: "https://huggingface.co",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "launchpad",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://launchpad.net/~{}",
        profile_url: "https://launchpad.net",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "npmjs",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://www.npmjs.com/~{}",
        profile_url: "https://npmjs.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "replit",
        category: Category::Dev,
        kind: TargetKind::Username,
        url: "https://replit.com/@{}",
        profile_url: "https://replit.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    // -- social ------------------------------------------------------------
    Site {
        name: "instagram",
        category: Category::Social,
        kind: TargetKind::Username,
        url: "https://www.instagram.com/api/v1/users/web_profile_info/?username={}",
        profile_url: "https://instagram.com",
        method: HttpMethod::Get,
        headers: &[
            ("x-ig-app-id", "936619743392459"),
            ("x-requested-with", "XMLHttpRequest"),
        ],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "reddit",
        category: Category::Social,
        kind: TargetKind::Username,
        url: "https://www.reddit.com/user/{}/",
        profile_url: "https://reddit.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "Sorry, nobody on Reddit goes by that name.",
            taken: None,
        },
    },
    Site {
        name: "threads",
        category: Category::Social,
        kind: TargetKind::Username,
        url: "https://www.threads.net/api/v1/users/web_profile_info/?username={}",
        profile_url: "https://threads.net",
        method: HttpMethod::Get,
        headers: &[("x-ig-app-id", "936619743392459")],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "x",
        category: Category::Social,
        kind: TargetKind::Username,
        url: "https://api.twitter.com/i/users/username_available.json?username={}",
        profile_url: "https://x.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "\"valid\":true",
            taken: Some("\"valid\":false"),
        },
    },
    // -- creator -----------------------------------------------------------
    Site {
        name: "medium",
        category: Category::Creator,
        kind: TargetKind::Username,
        url: "https://medium.com/@{}",
        profile_url: "https://medium.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "substack",
        category: Category::Creator,
        kind: TargetKind::Username,
        url: "https://{}.substack.com",
        profile_url: "https://substack.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "gumroad",
        category: Category::Creator,
        kind: TargetKind::Username,
        url: "https://{}.gumroad.com/",
        profile_url: "https://gumroad.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    // -- community ---------------------------------------------------------
    Site {
        name: "coderlegion",
        category: Category::Community,
        kind: TargetKind::Username,
        url: "https://coderlegion.com/user/{}",
        profile_url: "https://coderlegion.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    Site {
        name: "lemmy",
        category: Category::Community,
        kind: TargetKind::Username,
        url: "https://lemmy.world/api/v3/user?username={}",
        profile_url: "https://lemmy.world",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::Status {
            available: &[400, 404],
            taken: &[200],
        },
    },
    // -- gaming ------------------------------------------------------------
    Site {
        name: "chess.com",
        category: Category::Gaming,
        kind: TargetKind::Username,
        url: "https://www.chess.com/callback/user/valid?username={}",
        profile_url: "https://chess.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "\"valid\":true",
            taken: Some("\"valid\":false"),
        },
    },
    Site {
        name: "monkeytype",
        category: Category::Gaming,
        kind: TargetKind::Username,
        url: "https://api.monkeytype.com/users/checkName/{}",
        profile_url: "https://monkeytype.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "\"available\":true",
            taken: Some("\"available\":false"),
        },
    },
    // -- donation ----------------------------------------------------------
    Site {
        name: "liberapay",
        category: Category::Donation,
        kind: TargetKind::Username,
        url: "https://liberapay.com/{}",
        profile_url: "https://liberapay.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: STATUS_404_200,
    },
    // -- email endpoints ---------------------------------------------------
    Site {
        name: "x",
        category: Category::Social,
        kind: TargetKind::Email,
        url: "https://api.x.com/i/users/email_available.json?email={}",
        profile_url: "https://x.com",
        method: HttpMethod::Get,
        headers: &[],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "\"taken\":false",
            taken: Some("\"taken\":true"),
        },
    },
    Site {
        name: "replit",
        category: Category::Dev,
        kind: TargetKind::Email,
        url: "https://replit.com/data/user/exists",
        profile_url: "https://replit.com",
        method: HttpMethod::Post,
        headers: &[("referer", "https://replit.com/signup")],
        body: Some(r#"{"email":"{}"}"#),
        rule: ProbeRule::BodyContains {
            available: "\"exists\":false",
            taken: Some("\"exists\":true"),
        },
    },
    Site {
        name: "duolingo",
        category: Category::Learning,
        kind: TargetKind::Email,
        url: "https://www.duolingo.com/2017-06-30/users?email={}",
        profile_url: "https://duolingo.com",
        method: HttpMethod::Get,
        headers: &[("referer", "https://www.duolingo.com/")],
        body: None,
        rule: ProbeRule::BodyContains {
            available: "\"users\": []",
            taken: Some("\"users\""),
        },
    },
];

/// The full site catalog, usernames and emails together.
pub fn sites() -> &'static [Site] {
    SITES
}

/// Every site probing the given target kind, in catalog order.
pub fn sites_for(kind: TargetKind) -> Vec<&'static Site> {
    SITES.iter().filter(|s| s.kind == kind).collect()
}

/// Sites of one category for the given target kind.
pub fn sites_in_category(category: Category, kind: TargetKind) -> Vec<&'static Site> {
    SITES
        .iter()
        .filter(|s| s.kind == kind && s.category == category)
        .collect()
}

/// Look up a site by name (case-insensitive) for the given target kind.
pub fn find_site(name: &str, kind: TargetKind) -> Option<&'static Site> {
    SITES
        .iter()
        .find(|s| s.kind == kind && s.name.eq_ignore_ascii_case(name))
}

/// Categories present in the catalog for the given target kind, sorted.
pub fn categories(kind: TargetKind) -> Vec<Category> {
    let mut found: Vec<Category> = SITES
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.category)
        .collect();
    found.sort();
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_names_unique_per_kind() {
        for kind in [TargetKind::Username, TargetKind::Email] {
            let mut names: Vec<&str> =
                sites_for(kind).iter().map(|s| s.name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate site name for {kind}");
        }
    }

    #[test]
    fn test_url_templates_take_an_identifier() {
        for site in sites() {
            // POST probes may carry the identifier in the body instead.
            let in_url = site.url.contains("{}");
            let in_body = site.body.map_or(false, |b| b.contains("{}"));
            assert!(
                in_url || in_body,
                "site '{}' has no identifier placeholder",
                site.name
            );
        }
    }

    #[test]
    fn test_every_category_is_non_empty() {
        for category in categories(TargetKind::Username) {
            assert!(
                !sites_in_category(category, TargetKind::Username).is_empty()
            );
        }
        for category in categories(TargetKind::Email) {
            assert!(!sites_in_category(category, TargetKind::Email).is_empty());
        }
    }

    #[test]
    fn test_find_site_is_case_insensitive_and_kind_aware() {
        assert!(find_site("GitHub", TargetKind::Username).is_some());
        assert!(find_site("github", TargetKind::Email).is_none());
        let x_user = find_site("x", TargetKind::Username).unwrap();
        let x_email = find_site("x", TargetKind::Email).unwrap();
        assert_ne!(x_user.url, x_email.url);
    }

    #[test]
    fn test_profile_urls_are_https() {
        for site in sites() {
            assert!(
                site.profile_url.starts_with("https://"),
                "site '{}' has a non-https profile url",
                site.name
            );
        }
    }
}
