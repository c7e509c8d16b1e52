//! # API Module
//!
//! Remote data provider abstraction.
//!
//! ## Modules
//!
//! - [`github`] - GitHub REST lookups behind the [`GithubProvider`] trait

pub mod github;

pub use github::{
    GithubError, GithubProvider, LiveGithubClient, MockGithubProvider, Owner, Profile, Repository,
};
