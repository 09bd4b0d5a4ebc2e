use serde_json::Value;

/// 顾问给出的风险档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn parse(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("low") | Some("低") => RiskLevel::Low,
            Some("high") | Some("高") => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

/// 顾问网关的响应
///
/// 每个字段独立容错：缺失或类型不符时落回各自的默认值，整条响应
/// 不可解析时落回 `Default`。网关的任何输出都不会阻断对局。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AdvisoryResponse {
    /// 策略名
    pub strategy: String,
    /// 策略说明
    pub explanation: String,
    /// 建议打出的牌（文本牌面，可能不在手牌里）
    pub discard: Option<String>,
    /// 动作指引
    pub action: String,
    /// 风险档位
    pub risk_level: RiskLevel,
    /// 置信度 [0, 1]
    pub confidence: f64,
    /// 规则核对说明（至多 6 条）
    pub rule_notes: Vec<String>,
    /// 回复正文
    pub reply: String,
}

impl Default for AdvisoryResponse {
    fn default() -> Self {
        Self {
            strategy: String::new(),
            explanation: String::new(),
            discard: None,
            action: String::new(),
            risk_level: RiskLevel::Medium,
            confidence: 0.5,
            rule_notes: Vec::new(),
            reply: String::new(),
        }
    }
}

impl AdvisoryResponse {
    /// 解析响应正文
    ///
    /// 逐字段取值，任何字段缺失/类型不符都用默认值顶替，
    /// 整体不是 JSON 对象时返回全默认。
    pub fn parse(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let object = match value.as_object() {
            Some(o) => o,
            None => return Self::default(),
        };

        let text = |key: &str| -> String {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let mut rule_notes: Vec<String> = object
            .get("rule_notes")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        rule_notes.truncate(6);

        Self {
            strategy: text("strategy"),
            explanation: text("explanation"),
            discard: object
                .get("discard")
                .and_then(Value::as_str)
                .map(str::to_string),
            action: text("action"),
            risk_level: RiskLevel::parse(object.get("risk_level")),
            confidence: object
                .get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(0.5)
                .clamp(0.0, 1.0),
            rule_notes,
            reply: text("reply"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "strategy": "守牌",
            "explanation": "下家明显在听",
            "discard": "1万",
            "action": "打安全牌",
            "risk_level": "high",
            "confidence": 0.8,
            "rule_notes": ["财神不能打"],
            "reply": "建议打 1万"
        }"#;
        let response = AdvisoryResponse::parse(body);
        assert_eq!(response.strategy, "守牌");
        assert_eq!(response.discard.as_deref(), Some("1万"));
        assert_eq!(response.risk_level, RiskLevel::High);
        assert!((response.confidence - 0.8).abs() < 1e-9);
        assert_eq!(response.rule_notes.len(), 1);
    }

    #[test]
    fn test_parse_defaults_field_by_field() {
        // 字段类型不符：各自落回默认值，不影响其余字段
        let body = r#"{
            "strategy": 42,
            "discard": null,
            "risk_level": "紧张",
            "confidence": "高",
            "reply": "照常回复"
        }"#;
        let response = AdvisoryResponse::parse(body);
        assert_eq!(response.strategy, "");
        assert_eq!(response.discard, None);
        assert_eq!(response.risk_level, RiskLevel::Medium);
        assert!((response.confidence - 0.5).abs() < 1e-9);
        assert_eq!(response.reply, "照常回复");
    }

    #[test]
    fn test_parse_garbage_falls_back_to_default() {
        assert_eq!(AdvisoryResponse::parse("这不是 JSON"), AdvisoryResponse::default());
        assert_eq!(AdvisoryResponse::parse("[1,2,3]"), AdvisoryResponse::default());
    }

    #[test]
    fn test_confidence_clamped_and_notes_truncated() {
        let body = r#"{
            "confidence": 7.5,
            "rule_notes": ["1","2","3","4","5","6","7","8"]
        }"#;
        let response = AdvisoryResponse::parse(body);
        assert!((response.confidence - 1.0).abs() < 1e-9);
        assert_eq!(response.rule_notes.len(), 6);
    }
}
