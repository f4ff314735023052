//! Gemini `generateContent` 客户端
//!
//! 单次请求、不重试；阻塞式 reqwest 客户端在每次调用时创建，
//! 因此可以放在 `spawn_blocking` 中安全使用。

use serde::{Deserialize, Serialize};

use crate::enhancer::{EnhancerConfig, TextGenerator};
use crate::error::AnalysisError;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini 文本生成客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: EnhancerConfig,
}

impl GeminiClient {
    pub fn new(config: EnhancerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }
}

fn service_error(message: String) -> AnalysisError {
    AnalysisError::EnhancementService(message)
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| service_error(format!("cannot build HTTP client: {}", e)))?;

        let body = serde_json::to_string(&GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        })
        .map_err(|e| service_error(format!("cannot serialize request: {}", e)))?;

        tracing::debug!("调用增强服务: {}", self.config.endpoint());

        let response = client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    service_error(format!("request timed out after {:?}", self.config.timeout))
                } else {
                    service_error(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| service_error(format!("cannot read response body: {}", e)))?;

        if !status.is_success() {
            return Err(service_error(format!("service answered {}: {}", status, text)));
        }

        extract_text(&text)
    }
}

/// 取出第一个候选结果中的全部文本片段
fn extract_text(body: &str) -> Result<String, AnalysisError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| service_error(format!("unexpected response shape: {}", e)))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(service_error("response contained no text".to_string()));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// 在本地端口上应答一次 HTTP 请求，返回 (地址, 收到的请求文本)
    fn serve_once(status: &'static str, body: String) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 4096];
            loop {
                let read = stream.read(&mut buffer).unwrap();
                request.extend_from_slice(&buffer[..read]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + length || read == 0 {
                        break;
                    }
                }
                if read == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (address, handle)
    }

    fn client(api_url: String) -> GeminiClient {
        GeminiClient::new(EnhancerConfig {
            api_url,
            api_key: "test-key-123".to_string(),
            model: "gemini-pro".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[test]
    fn extracts_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"element\":"},{"text":"\"img\"}]"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), r#"[{"element":"img"}]"#);
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(extract_text(r#"{"candidates":[]}"#).is_err());
        assert!(extract_text("<html>").is_err());
    }

    #[test]
    fn posts_prompt_and_returns_text() {
        let reply = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "[]"}]}}]
        })
        .to_string();
        let (address, server) = serve_once("200 OK", reply);

        let text = client(address).generate("rewrite these").unwrap();
        assert_eq!(text, "[]");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /models/gemini-pro:generateContent HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key-123"));
        assert!(request.contains(r#"{"contents":[{"parts":[{"text":"rewrite these"}]}]}"#));
    }

    #[test]
    fn error_status_is_an_enhancement_error() {
        let (address, server) = serve_once("400 Bad Request", r#"{"error":"API Error"}"#.to_string());

        match client(address).generate("x") {
            Err(AnalysisError::EnhancementService(message)) => assert!(message.contains("400")),
            other => panic!("expected enhancement error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn silent_service_times_out() {
        // 保持监听但从不应答，请求会停在等待响应阶段
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut silent = client(format!("http://{}", listener.local_addr().unwrap()));
        silent.config.timeout = Duration::from_millis(200);

        match silent.generate("x") {
            Err(AnalysisError::EnhancementService(message)) => {
                assert!(message.contains("timed out"), "{}", message)
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        drop(listener);
    }

    #[test]
    fn unreachable_service_is_an_enhancement_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        assert!(matches!(
            client(address).generate("x"),
            Err(AnalysisError::EnhancementService(_))
        ));
    }
}
