//! Back-office accounts.
//!
//! Each row links an identity-provider subject (`sub`) to a local name, email
//! and role. Authentication itself is done by the JWT middleware.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/users` | List accounts |
//! | POST | `/api/admin/users` | Create an account |
//! | GET/PUT/DELETE | `/api/admin/users/{id}` | Read, update, delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdminUserService;
