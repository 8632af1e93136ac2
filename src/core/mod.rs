pub mod assistant;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod query;
pub mod session;

pub use crate::domain::model::{Category, Course, Gig, JobPost, Theme, User};
pub use crate::domain::ports::{Listing, Storage, TextGenerator};
pub use crate::utils::error::Result;
