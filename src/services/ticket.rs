use crate::proto::TicketCategory;
use crate::state::ticket::{CategoryChoice, TicketState};

/// A validated, fully composed ticket submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    pub category: TicketCategory,
    pub title: String,
    pub body: String,
}

/// Validation and body composition for the create-ticket form
pub struct TicketService;

impl TicketService {
    /// Validate the form and compose the outbound request. Checks run in
    /// order and the first failure wins, so only one error is ever shown:
    /// category, body, then (for server verification) the invite URL.
    pub fn build_request(form: &TicketState) -> Result<TicketRequest, String> {
        let Some(category) = form.category.to_wire() else {
            return Err("Please select a category".to_string());
        };

        if form.body.is_empty() {
            return Err("Please enter a body".to_string());
        }

        // Reporter fields only apply to abuse reports.
        let (user_ids, message_ids) = if form.category == CategoryChoice::Abuse {
            (form.user_ids.as_str(), form.message_ids.as_str())
        } else {
            ("", "")
        };

        let mut body = form.body.clone();

        if !user_ids.is_empty() {
            let mentions = split_ids(user_ids)
                .map(|id| format!(" [@:{}]", id))
                .collect::<Vec<_>>()
                .join(",");
            body = format!("User(s) to report:{}\n\n{}", mentions, body);
        }

        if !message_ids.is_empty() {
            let quotes: String = split_ids(message_ids).map(|id| format!("[q:{}]", id)).collect();
            body.push_str(&format!("\n\nMessage(s) to report:\n{}\n\n", quotes));
        }

        let mut title = form.title.clone();

        if form.category == CategoryChoice::ServerVerification {
            if form.invite_url.is_empty() {
                return Err(
                    "Please enter an invite URL (from your server settings)".to_string(),
                );
            }
            body = format!("Server Invite URL: {}\n\nExcited For:\n{}", form.invite_url, body);
            title = "Server Verification".to_string();
        }

        Ok(TicketRequest { category, title, body })
    }
}

/// Comma-separated ids with all whitespace stripped.
fn split_ids(raw: &str) -> impl Iterator<Item = String> + '_ {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .split(',')
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TicketState {
        TicketState::default()
    }

    #[test]
    fn unselected_category_is_the_first_error() {
        let mut f = form();
        f.body = "something".to_string();
        assert_eq!(
            TicketService::build_request(&f),
            Err("Please select a category".to_string())
        );
    }

    #[test]
    fn empty_body_errors_for_every_plain_category() {
        for category in [
            CategoryChoice::Question,
            CategoryChoice::Account,
            CategoryChoice::Abuse,
            CategoryChoice::Other,
        ] {
            let mut f = form();
            f.category = category;
            assert_eq!(
                TicketService::build_request(&f),
                Err("Please enter a body".to_string()),
                "category {:?}",
                category
            );
        }
    }

    #[test]
    fn abuse_ids_surround_the_original_body() {
        let mut f = form();
        f.category = CategoryChoice::Abuse;
        f.user_ids = "1, 2".to_string();
        f.message_ids = "3,4".to_string();
        f.title = "spam".to_string();
        f.body = "keeps spamming invites".to_string();

        let req = TicketService::build_request(&f).unwrap();
        assert_eq!(req.category, TicketCategory::Abuse);
        assert_eq!(req.title, "spam");
        assert_eq!(
            req.body,
            "User(s) to report: [@:1], [@:2]\n\nkeeps spamming invites\n\nMessage(s) to report:\n[q:3][q:4]\n\n"
        );

        let mentions = req.body.find(" [@:1], [@:2]").unwrap();
        let original = req.body.find("keeps spamming invites").unwrap();
        let quotes = req.body.find("[q:3][q:4]").unwrap();
        assert!(mentions < original && original < quotes);
    }

    #[test]
    fn non_abuse_categories_drop_reporter_fields() {
        let mut f = form();
        f.category = CategoryChoice::Question;
        f.user_ids = "1".to_string();
        f.message_ids = "2".to_string();
        f.body = "how do roles work?".to_string();

        let req = TicketService::build_request(&f).unwrap();
        assert_eq!(req.body, "how do roles work?");
    }

    #[test]
    fn verification_requires_invite_url_even_with_body() {
        let mut f = form();
        f.category = CategoryChoice::ServerVerification;
        f.body = "custom invite perk".to_string();
        assert_eq!(
            TicketService::build_request(&f),
            Err("Please enter an invite URL (from your server settings)".to_string())
        );
    }

    #[test]
    fn verification_prepends_invite_and_overrides_title() {
        let mut f = form();
        f.category = CategoryChoice::ServerVerification;
        f.title = "ignored".to_string();
        f.body = "custom invite perk".to_string();
        f.invite_url = "https://meridian.chat/i/abc123".to_string();

        let req = TicketService::build_request(&f).unwrap();
        assert_eq!(req.category, TicketCategory::ServerVerification);
        assert_eq!(req.title, "Server Verification");
        assert_eq!(
            req.body,
            "Server Invite URL: https://meridian.chat/i/abc123\n\nExcited For:\ncustom invite perk"
        );
    }

    #[test]
    fn body_check_runs_before_invite_url_check() {
        let mut f = form();
        f.category = CategoryChoice::ServerVerification;
        assert_eq!(
            TicketService::build_request(&f),
            Err("Please enter a body".to_string())
        );
    }
}
