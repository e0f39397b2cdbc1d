//! 认证授权模块
//!
//! 提供 JWT 验证与调查员角色检查：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前调查员上下文
//! - [`require_investigator`] - 调查员中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_investigator;
