//! Fixture builders for GitHub records
//!
//! Keeps test setup short: most tests only care about a login, a follower
//! count or a star count.

use crate::api::github::{Owner, Profile, Repository};

/// Repository with the given owner and star count, other counters zero
pub fn repo(name: &str, owner: &str, stars: u64) -> Repository {
    Repository {
        id: 0,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        html_url: format!("https://github.com/{owner}/{name}"),
        owner: Owner {
            login: owner.to_string(),
            avatar_url: format!("https://github.com/{owner}.png?size=200"),
        },
        stargazers_count: stars,
        forks: 0,
        open_issues: 0,
        updated_at: None,
    }
}

/// Repository with an explicit `updated_at` timestamp
pub fn repo_updated(name: &str, owner: &str, stars: u64, updated_at: &str) -> Repository {
    Repository {
        updated_at: Some(updated_at.to_string()),
        ..repo(name, owner, stars)
    }
}

/// Profile with the given follower count and nothing else of note
pub fn profile(login: &str, followers: u64) -> Profile {
    Profile {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://github.com/{login}.png?size=200"),
        html_url: format!("https://github.com/{login}"),
        location: None,
        company: None,
        followers,
        following: 0,
        public_repos: 0,
    }
}
