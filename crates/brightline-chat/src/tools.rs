//! Tool catalog and tool-call interpretation.

use serde_json::json;

use brightline_core::types::{
    non_blank, ContactPayload, FillContactData, NavigationRequest, ToolInvocation,
};

use crate::error::ToolError;
use crate::provider::ToolSpec;

pub const COLLECT_CONTACT: &str = "collect_contact";
pub const NAVIGATE_TO_PAGE: &str = "navigate_to_page";

/// Routes `navigate_to_page` may target.
pub const SITE_PAGES: [&str; 6] = ["/", "/about", "/services", "/portfolio", "/contact", "/terms"];

/// The two tools offered to the provider on every primary call.
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: COLLECT_CONTACT.to_string(),
            description: "Capture a visitor's project inquiry once their name, email \
                          address and project description are known. Pre-fills the \
                          contact form and notifies the team."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Visitor's name" },
                    "email": { "type": "string", "description": "Visitor's email address" },
                    "description": { "type": "string", "description": "What they want built" },
                    "projectType": {
                        "type": "string",
                        "description": "Kind of project, e.g. Website, Web App, Mobile App, AI Integration"
                    },
                    "budget": { "type": "string", "description": "Budget range, if mentioned" },
                    "timeline": { "type": "string", "description": "Desired timeline, if mentioned" }
                },
                "required": ["name", "email", "description"]
            }),
        },
        ToolSpec {
            name: NAVIGATE_TO_PAGE.to_string(),
            description: "Take the visitor to a page on the Brightline website.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "enum": SITE_PAGES,
                        "description": "Site-relative route"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Short explanation shown to the visitor"
                    }
                },
                "required": ["path"]
            }),
        },
    ]
}

/// A tool call the orchestrator can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    CollectContact(ContactPayload),
    Navigate(NavigationRequest),
}

impl ToolCall {
    /// Validate an invocation's name and arguments.
    pub fn parse(invocation: &ToolInvocation) -> Result<Self, ToolError> {
        match invocation.name.as_str() {
            COLLECT_CONTACT => {
                let payload: ContactPayload = parse_arguments(invocation)?;
                let missing = payload.missing_required();
                if !missing.is_empty() {
                    return Err(malformed(
                        COLLECT_CONTACT,
                        format!("missing {}", missing.join(", ")),
                    ));
                }
                Ok(ToolCall::CollectContact(normalize_contact(payload)))
            }
            NAVIGATE_TO_PAGE => {
                let mut request: NavigationRequest = parse_arguments(invocation)?;
                request.path = request.path.trim().to_string();
                if request.path.is_empty() {
                    return Err(malformed(NAVIGATE_TO_PAGE, "missing path".to_string()));
                }
                if !request.is_site_relative() {
                    return Err(malformed(
                        NAVIGATE_TO_PAGE,
                        format!("path is not site-relative: {}", request.path),
                    ));
                }
                if request.path.len() > 1 {
                    request.path = request.path.trim_end_matches('/').to_string();
                }
                if !SITE_PAGES.contains(&request.path.as_str()) {
                    return Err(malformed(
                        NAVIGATE_TO_PAGE,
                        format!("unknown page: {}", request.path),
                    ));
                }
                request.reason = non_blank(&request.reason).map(str::to_string);
                Ok(ToolCall::Navigate(request))
            }
            other => Err(ToolError::Unknown(other.to_string())),
        }
    }
}

fn parse_arguments<T: serde::de::DeserializeOwned>(
    invocation: &ToolInvocation,
) -> Result<T, ToolError> {
    let raw = invocation.arguments.trim();
    let raw = if raw.is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| malformed(&invocation.name, e.to_string()))
}

fn malformed(tool: &str, reason: String) -> ToolError {
    ToolError::MalformedArguments {
        tool: tool.to_string(),
        reason,
    }
}

fn normalize_contact(payload: ContactPayload) -> ContactPayload {
    ContactPayload {
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
        description: payload.description.trim().to_string(),
        project_type: non_blank(&payload.project_type).map(str::to_string),
        budget: non_blank(&payload.budget).map(str::to_string),
        timeline: non_blank(&payload.timeline).map(str::to_string),
    }
}

/// Description followed by labeled optional details, one per line.
pub fn summary_lines(payload: &ContactPayload) -> String {
    let mut lines = vec![payload.description.clone()];
    for (label, value) in [
        ("Project type", &payload.project_type),
        ("Budget", &payload.budget),
        ("Timeline", &payload.timeline),
    ] {
        if let Some(v) = non_blank(value) {
            lines.push(format!("{}: {}", label, v));
        }
    }
    lines.join("\n")
}

/// Form pre-fill data for a captured contact.
pub fn fill_contact_data(payload: &ContactPayload) -> FillContactData {
    FillContactData {
        name: payload.name.clone(),
        email: payload.email.clone(),
        message: summary_lines(payload),
    }
}

/// Content of the synthetic `tool` turn answering `collect_contact`.
pub fn capture_summary(payload: &ContactPayload) -> String {
    format!(
        "Contact captured. Name: {}. Email: {}. Project: {}. The contact form has been \
         pre-filled so they can review and submit it. Confirm warmly in one or two sentences \
         and say the team will follow up within one business day.",
        payload.name,
        payload.email,
        summary_lines(payload).replace('\n', "; ")
    )
}

/// Used when the follow-up confirmation call fails or comes back empty.
pub fn fallback_confirmation(name: &str) -> String {
    format!(
        "Thanks, {}! I've passed your details to our team and pre-filled the contact form \
         for you. We'll be in touch within one business day.",
        name
    )
}

/// Reply accompanying a navigation action.
pub fn navigation_message(request: &NavigationRequest) -> String {
    match non_blank(&request.reason) {
        Some(reason) => format!("Sure! Taking you to {} now. {}", request.path, reason),
        None => "Sure, let's go there now!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(name: &str, arguments: &str) -> ToolInvocation {
        ToolInvocation {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[test]
    fn test_catalog_has_two_tools() {
        let tools = catalog();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![COLLECT_CONTACT, NAVIGATE_TO_PAGE]);
        assert_eq!(
            tools[0].parameters["required"],
            json!(["name", "email", "description"])
        );
        assert_eq!(tools[1].parameters["required"], json!(["path"]));
    }

    #[test]
    fn test_parse_collect_contact() {
        let call = ToolCall::parse(&invocation(
            COLLECT_CONTACT,
            r#"{"name":" Raj ","email":"raj@x.com","description":"build a delivery app","projectType":"Mobile App","budget":""}"#,
        ))
        .unwrap();
        match call {
            ToolCall::CollectContact(p) => {
                assert_eq!(p.name, "Raj");
                assert_eq!(p.project_type.as_deref(), Some("Mobile App"));
                assert!(p.budget.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_collect_contact_missing_email_is_malformed() {
        let err = ToolCall::parse(&invocation(
            COLLECT_CONTACT,
            r#"{"name":"Raj","description":"app"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { ref reason, .. } if reason.contains("email")));
    }

    #[test]
    fn test_collect_contact_invalid_json_is_malformed() {
        let err = ToolCall::parse(&invocation(COLLECT_CONTACT, "{not json")).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
        let err = ToolCall::parse(&invocation(COLLECT_CONTACT, "")).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
    }

    #[test]
    fn test_parse_navigate() {
        let call = ToolCall::parse(&invocation(NAVIGATE_TO_PAGE, r#"{"path":"/contact"}"#)).unwrap();
        assert_eq!(
            call,
            ToolCall::Navigate(NavigationRequest {
                path: "/contact".to_string(),
                reason: None
            })
        );
    }

    #[test]
    fn test_navigate_rejects_external_url() {
        let err = ToolCall::parse(&invocation(
            NAVIGATE_TO_PAGE,
            r#"{"path":"https://evil.example"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
    }

    #[test]
    fn test_navigate_rejects_backslash_host() {
        let err = ToolCall::parse(&invocation(
            NAVIGATE_TO_PAGE,
            r#"{"path":"/\\evil.example"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
    }

    #[test]
    fn test_navigate_only_known_pages() {
        let err = ToolCall::parse(&invocation(NAVIGATE_TO_PAGE, r#"{"path":"/admin"}"#)).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { ref reason, .. } if reason.contains("/admin")));

        for page in SITE_PAGES {
            let args = json!({ "path": page }).to_string();
            assert!(ToolCall::parse(&invocation(NAVIGATE_TO_PAGE, &args)).is_ok(), "{}", page);
        }

        match ToolCall::parse(&invocation(NAVIGATE_TO_PAGE, r#"{"path":"/services/"}"#)).unwrap() {
            ToolCall::Navigate(req) => assert_eq!(req.path, "/services"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_navigate_missing_path() {
        let err = ToolCall::parse(&invocation(NAVIGATE_TO_PAGE, r#"{"reason":"x"}"#)).unwrap_err();
        assert!(matches!(err, ToolError::MalformedArguments { .. }));
    }

    #[test]
    fn test_unknown_tool() {
        let err = ToolCall::parse(&invocation("launch_rocket", "{}")).unwrap_err();
        assert_eq!(err, ToolError::Unknown("launch_rocket".to_string()));
    }

    #[test]
    fn test_summary_lines() {
        let p = ContactPayload {
            name: "Raj".to_string(),
            email: "raj@x.com".to_string(),
            description: "build a delivery app".to_string(),
            project_type: Some("Mobile App".to_string()),
            budget: None,
            timeline: Some("3 months".to_string()),
        };
        assert_eq!(
            summary_lines(&p),
            "build a delivery app\nProject type: Mobile App\nTimeline: 3 months"
        );
        let data = fill_contact_data(&p);
        assert_eq!(data.name, "Raj");
        assert_eq!(data.message, summary_lines(&p));
    }

    #[test]
    fn test_navigation_message() {
        let generic = NavigationRequest {
            path: "/contact".to_string(),
            reason: None,
        };
        assert_eq!(navigation_message(&generic), "Sure, let's go there now!");

        let reasoned = NavigationRequest {
            path: "/portfolio".to_string(),
            reason: Some("You can browse our recent work there.".to_string()),
        };
        assert_eq!(
            navigation_message(&reasoned),
            "Sure! Taking you to /portfolio now. You can browse our recent work there."
        );
    }

    #[test]
    fn test_fallback_confirmation_uses_name() {
        assert!(fallback_confirmation("Raj").starts_with("Thanks, Raj!"));
    }
}
