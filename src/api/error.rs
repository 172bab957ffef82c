// ==========================================
// 治具使用监控系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户可读的错误消息
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 主数据重复录入时返回给前端的提示
pub const MSG_ITEM_ALREADY_EXISTS: &str = "THE ITEM ALREADY EXISTS";

/// 扫码序列号不在主数据中
pub const MSG_SERIAL_NOT_FOUND: &str = "Serial number not found in masterlist";

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),

            // 唯一约束只可能来自序列号
            RepositoryError::UniqueConstraintViolation(_) => {
                ApiError::AlreadyExists(MSG_ITEM_ALREADY_EXISTS.to_string())
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }

            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_already_exists() {
        let err: ApiError =
            RepositoryError::UniqueConstraintViolation("UNIQUE constraint failed".to_string()).into();
        assert!(matches!(err, ApiError::AlreadyExists(_)));
        assert_eq!(err.to_string(), "THE ITEM ALREADY EXISTS");
    }

    #[test]
    fn test_not_found_message_contains_entity() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "MasterlistItem".to_string(),
            id: "7".to_string(),
        }
        .into();
        assert!(err.to_string().contains("MasterlistItem(id=7)"));
    }
}
