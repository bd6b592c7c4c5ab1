use std::collections::HashMap;
use std::sync::Arc;

use growsoft_lua_checker::{
    check_lua_syntax, respond, CheckError, CheckRequest, CheckResponse, CheckResult, Imbalance,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// `source` field on every published diagnostic.
const DIAGNOSTIC_SOURCE: &str = "lua-check";

// =============================================================================
// Document State
// =============================================================================

/// Cached check state for a single document.
struct DocumentState {
    source: String,
    result: CheckResult,
}

impl DocumentState {
    fn new(source: String) -> Self {
        let result = check_lua_syntax(&source);
        Self { source, result }
    }
}

// =============================================================================
// Backend
// =============================================================================

struct Backend {
    client: Client,
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish()
    }
}

impl Backend {
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn publish_diagnostics(&self, uri: &Url) {
        let diagnostics = {
            let docs = self.documents.read().await;
            let Some(doc) = docs.get(uri) else { return };
            document_diagnostics(doc)
        };

        log::debug!("publishing {} diagnostic(s) for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;
    }

    async fn store(&self, uri: Url, source: String) {
        let doc = DocumentState::new(source);
        self.documents.write().await.insert(uri.clone(), doc);
        self.publish_diagnostics(&uri).await;
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

fn document_diagnostics(doc: &DocumentState) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::with_capacity(doc.result.warnings().len() + 1);

    if let Some(error) = doc.result.error() {
        diagnostics.push(Diagnostic {
            range: error_range(&doc.source, error),
            severity: Some(DiagnosticSeverity::ERROR),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: error.to_string(),
            ..Default::default()
        });
    }

    for warning in doc.result.warnings() {
        diagnostics.push(Diagnostic {
            range: line_range(&doc.source, warning.line().saturating_sub(1) as u32),
            severity: Some(DiagnosticSeverity::WARNING),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: warning.kind().message().to_string(),
            ..Default::default()
        });
    }

    diagnostics
}

/// Missing closers are reported at the end of the document, everything else
/// at its start.
fn error_range(text: &str, error: &CheckError) -> Range {
    match error {
        CheckError::UnbalancedBrackets(Imbalance::Missing)
        | CheckError::UnbalancedParens(Imbalance::Missing)
        | CheckError::UnbalancedBraces(Imbalance::Missing) => {
            let end = end_position(text);
            Range { start: end, end }
        }
        _ => Range::default(),
    }
}

// =============================================================================
// Custom Requests
// =============================================================================

#[derive(Debug, Deserialize)]
struct CheckScriptParams {
    uri: Option<String>,
    content: Option<String>,
}

impl Backend {
    /// Handle lua/checkScript: checks raw `content`, or the open document at
    /// `uri`, and returns `{ success, valid, error?, warnings }`.
    async fn handle_check_script(
        &self,
        params: serde_json::Value,
    ) -> tower_lsp::jsonrpc::Result<serde_json::Value> {
        let params: CheckScriptParams = serde_json::from_value(params)
            .map_err(|e| tower_lsp::jsonrpc::Error::invalid_params(e.to_string()))?;

        let response = match (params.content, params.uri) {
            (Some(content), _) => respond(&CheckRequest {
                content: Some(content),
            }),
            (None, Some(uri)) => {
                let uri: Url = uri
                    .parse()
                    .map_err(|e| tower_lsp::jsonrpc::Error::invalid_params(format!("{}", e)))?;
                let docs = self.documents.read().await;
                let doc = docs
                    .get(&uri)
                    .ok_or_else(|| tower_lsp::jsonrpc::Error::invalid_params("Document not found"))?;
                CheckResponse::from(&doc.result)
            }
            (None, None) => {
                return Err(tower_lsp::jsonrpc::Error::invalid_params(
                    "Either `content` or `uri` is required",
                ))
            }
        };

        serde_json::to_value(&response).map_err(|e| tower_lsp::jsonrpc::Error {
            code: tower_lsp::jsonrpc::ErrorCode::InternalError,
            message: e.to_string().into(),
            data: None,
        })
    }
}

// =============================================================================
// LSP Trait Implementation
// =============================================================================

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Growsoft Lua LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        log::info!("opened {}", params.text_document.uri);
        self.store(params.text_document.uri, params.text_document.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().next() {
            self.store(uri, change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.write().await.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Whole-line range for a 0-indexed line.
fn line_range(text: &str, line: u32) -> Range {
    let width = text
        .split('\n')
        .nth(line as usize)
        .map(|l| l.trim_end_matches('\r').chars().count() as u32)
        .unwrap_or(0);
    Range {
        start: Position { line, character: 0 },
        end: Position {
            line,
            character: width,
        },
    }
}

fn end_position(text: &str) -> Position {
    let line = text.matches('\n').count() as u32;
    let last_line_start = text.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position {
        line,
        character: text[last_line_start..].chars().count() as u32,
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    env_logger::init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(Backend::new)
        .custom_method("lua/checkScript", Backend::handle_check_script)
        .finish();
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diagnostics(source: &str) -> Vec<Diagnostic> {
        document_diagnostics(&DocumentState::new(source.to_string()))
    }

    #[test]
    fn test_clean_document_has_no_diagnostics() {
        assert!(diagnostics("function f()\n  print(1)\nend").is_empty());
    }

    #[test]
    fn test_warning_on_its_line() {
        let diags = diagnostics("local a = 1\nlocal b = 2;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(diags[0].message, "Semicolons are optional in Lua");
        assert_eq!(
            diags[0].range,
            Range {
                start: Position {
                    line: 1,
                    character: 0
                },
                end: Position {
                    line: 1,
                    character: 12
                },
            }
        );
    }

    #[test]
    fn test_error_first_then_warnings() {
        let diags = diagnostics("if a === b then end");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(
            diags[0].message,
            "Mismatched function definitions and 'end' statements"
        );
        assert_eq!(diags[0].range, Range::default());
        assert_eq!(diags[0].source.as_deref(), Some(DIAGNOSTIC_SOURCE));
        assert_eq!(diags[1].severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn test_missing_closer_at_end_of_document() {
        let diags = diagnostics("local t = {\n  x = 1\n");
        assert_eq!(diags[0].message, "Unbalanced curly braces: missing }");
        let end = Position {
            line: 2,
            character: 0,
        };
        assert_eq!(diags[0].range, Range { start: end, end });
    }

    #[test]
    fn test_extra_closer_at_document_start() {
        let diags = diagnostics("print(1))\nprint(2)");
        assert_eq!(diags[0].message, "Unbalanced parentheses: extra )");
        assert_eq!(diags[0].range, Range::default());
    }

    #[test]
    fn test_check_script_params_fields_are_optional() {
        let params: CheckScriptParams =
            serde_json::from_value(serde_json::json!({ "uri": "file:///a.lua" })).unwrap();
        assert_eq!(params.uri.as_deref(), Some("file:///a.lua"));
        assert_eq!(params.content, None);

        let params: CheckScriptParams =
            serde_json::from_value(serde_json::json!({ "content": "x = 1" })).unwrap();
        assert_eq!(params.uri, None);
        assert_eq!(params.content.as_deref(), Some("x = 1"));
    }

    #[test]
    fn test_end_position_counts_chars() {
        assert_eq!(
            end_position("a\nçé"),
            Position {
                line: 1,
                character: 2
            }
        );
        assert_eq!(
            end_position(""),
            Position {
                line: 0,
                character: 0
            }
        );
    }

    #[test]
    fn test_line_range_strips_carriage_return() {
        assert_eq!(line_range("ab;\r\ncd", 0).end.character, 3);
        assert_eq!(line_range("ab", 5).end.character, 0);
    }
}
