// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod token;
pub mod user;

pub use token::{Claims, IssuedTokens, TokenType};
pub use user::{NewUser, PublicUser, Role, User};
