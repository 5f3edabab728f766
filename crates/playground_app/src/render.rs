use playground_core::{AppViewModel, ResponseState};

/// Text rendering of the view model for the terminal.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();

    if let Some(account) = &view.service_account {
        lines.push(format!(
            "service account: {account} (share the spreadsheet with this address)"
        ));
    }
    if view.searching {
        lines.push("searching...".to_string());
    }

    match &view.response {
        ResponseState::Idle => lines.push("no result".to_string()),
        ResponseState::Error(message) => lines.push(format!("error: {message}")),
        ResponseState::Result {
            api_url,
            status,
            body,
        } => {
            lines.push(format!("api url: {api_url}"));
            lines.push(format!("status: {status}"));
            if let Some(page) = &view.page {
                if let Some(next_offset) = page.next_offset {
                    lines.push(format!("next page: offset={next_offset}"));
                }
            }
            lines.push(serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()));
        }
    }

    lines.join("\n")
}
