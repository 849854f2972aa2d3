//! HTTP client for GitHub API

pub mod client;
pub mod pagination;
pub mod pulls;
pub mod rate_limit;
pub mod workflows;

pub use client::GitHubApiClient;
pub use pagination::{parse_next_link, PageFetcher};
pub use pulls::PullRequestLister;
pub use rate_limit::RateLimiter;
pub use workflows::{WorkflowRunDetailFetcher, WorkflowRunLocator};
