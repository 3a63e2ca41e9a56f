use crate::proto::{Ticket, TicketCategory};

/// Form-side category selection, including the placeholder the user must
/// move off before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Select,
    ServerVerification,
    Question,
    Account,
    Abuse,
    Other,
}

impl CategoryChoice {
    pub const ALL: [CategoryChoice; 6] = [
        CategoryChoice::Select,
        CategoryChoice::ServerVerification,
        CategoryChoice::Question,
        CategoryChoice::Account,
        CategoryChoice::Abuse,
        CategoryChoice::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryChoice::Select => "Choose a category",
            CategoryChoice::ServerVerification => "Verify Server",
            CategoryChoice::Question => "Question",
            CategoryChoice::Account => "Account",
            CategoryChoice::Abuse => "Abuse",
            CategoryChoice::Other => "Other",
        }
    }

    pub fn to_wire(self) -> Option<TicketCategory> {
        match self {
            CategoryChoice::Select => None,
            CategoryChoice::ServerVerification => Some(TicketCategory::ServerVerification),
            CategoryChoice::Question => Some(TicketCategory::Question),
            CategoryChoice::Account => Some(TicketCategory::Account),
            CategoryChoice::Abuse => Some(TicketCategory::Abuse),
            CategoryChoice::Other => Some(TicketCategory::Other),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketFocus {
    Category,
    UserIds,
    MessageIds,
    Title,
    Body,
    InviteUrl,
    Submit,
}

/// State for the create-ticket modal
pub struct TicketState {
    pub show_modal: bool,
    pub category: CategoryChoice,
    pub user_ids: String,
    pub message_ids: String,
    pub title: String,
    pub body: String,
    pub invite_url: String,
    pub error: Option<String>,
    pub focus: TicketFocus,
    pub submitting: bool,
    /// Last created ticket, shown in the detail view after navigation.
    pub created: Option<Ticket>,
}

impl Default for TicketState {
    fn default() -> Self {
        Self {
            show_modal: false,
            category: CategoryChoice::Select,
            user_ids: String::new(),
            message_ids: String::new(),
            title: String::new(),
            body: String::new(),
            invite_url: String::new(),
            error: None,
            focus: TicketFocus::Category,
            submitting: false,
            created: None,
        }
    }
}

impl TicketState {
    pub fn open_modal(&mut self) {
        self.reset_form();
        self.show_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    pub fn reset_form(&mut self) {
        self.category = CategoryChoice::Select;
        self.user_ids.clear();
        self.message_ids.clear();
        self.title.clear();
        self.body.clear();
        self.invite_url.clear();
        self.error = None;
        self.focus = TicketFocus::Category;
        self.submitting = false;
    }

    /// The fields visible for the current category, in focus-cycle order.
    pub fn focus_cycle(&self) -> Vec<TicketFocus> {
        let mut cycle = vec![TicketFocus::Category];
        match self.category {
            CategoryChoice::Abuse => {
                cycle.extend([
                    TicketFocus::UserIds,
                    TicketFocus::MessageIds,
                    TicketFocus::Title,
                    TicketFocus::Body,
                ]);
            }
            CategoryChoice::ServerVerification => {
                cycle.extend([TicketFocus::InviteUrl, TicketFocus::Body]);
            }
            CategoryChoice::Select => {}
            _ => {
                cycle.extend([TicketFocus::Title, TicketFocus::Body]);
            }
        }
        cycle.push(TicketFocus::Submit);
        cycle
    }

    pub fn focus_next(&mut self) {
        let cycle = self.focus_cycle();
        let idx = cycle.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = cycle[(idx + 1) % cycle.len()];
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            TicketFocus::UserIds => Some(&mut self.user_ids),
            TicketFocus::MessageIds => Some(&mut self.message_ids),
            TicketFocus::Title => Some(&mut self.title),
            TicketFocus::Body => Some(&mut self.body),
            TicketFocus::InviteUrl => Some(&mut self.invite_url),
            TicketFocus::Category | TicketFocus::Submit => None,
        }
    }
}
