// Password hashing, bearer tokens, and the register/login endpoints.

pub mod handlers;
pub mod jwt;
pub mod password;
