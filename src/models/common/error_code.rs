use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码
///
/// 与 HTTP 状态码配合使用，前端据此区分具体失败原因。
/// 编码规则：HTTP 状态码 × 100 + 序号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 400xx - 请求错误
    BadRequest = 40000,
    ValidationFailed = 40001,

    // 401xx - 认证错误
    Unauthorized = 40100,

    // 403xx - 权限错误
    Forbidden = 40300,
    AssessmentNotLive = 40301,
    AssessmentNotOpen = 40302,
    AssessmentClosed = 40303,

    // 404xx - 资源不存在
    NotFound = 40400,
    AssessmentNotFound = 40401,
    UserNotFound = 40402,
    ResultNotFound = 40403,

    // 409xx - 冲突
    Conflict = 40900,
    AlreadySubmitted = 40901,

    // 429xx - 速率限制
    RateLimitExceeded = 42900,

    // 500xx - 服务端错误
    InternalServerError = 50000,
}
