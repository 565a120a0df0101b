//! Form state and validation for login and the three-step signup

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_GENRES: usize = 1;
pub const MAX_GENRES: usize = 5;
/// Grid shapes used by both cursor movement and rendering.
pub const GENRE_GRID_COLS: usize = 3;
pub const AVATAR_GRID_COLS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const GENRES: [Genre; 12] = [
    Genre { id: "pop", name: "Pop", icon: "🎤" },
    Genre { id: "rock", name: "Rock", icon: "🎸" },
    Genre { id: "hiphop", name: "Hip-Hop", icon: "🎧" },
    Genre { id: "electronic", name: "Electronic", icon: "🎛" },
    Genre { id: "rnb", name: "R&B", icon: "🎹" },
    Genre { id: "jazz", name: "Jazz", icon: "🎷" },
    Genre { id: "classical", name: "Classical", icon: "🎻" },
    Genre { id: "country", name: "Country", icon: "🪕" },
    Genre { id: "indie", name: "Indie", icon: "🌙" },
    Genre { id: "metal", name: "Metal", icon: "🤘" },
    Genre { id: "latin", name: "Latin", icon: "💃" },
    Genre { id: "kpop", name: "K-Pop", icon: "⭐" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Avatar {
    pub id: u8,
    pub face: &'static str,
}

pub const AVATARS: [Avatar; 8] = [
    Avatar { id: 1, face: "😎" },
    Avatar { id: 2, face: "🎧" },
    Avatar { id: 3, face: "🌟" },
    Avatar { id: 4, face: "🎸" },
    Avatar { id: 5, face: "🌈" },
    Avatar { id: 6, face: "🔥" },
    Avatar { id: 7, face: "🌙" },
    Avatar { id: 8, face: "⚡" },
];

impl Avatar {
    /// Profile picture URL stored on the account for this avatar.
    pub fn image_url(&self) -> String {
        format!("https://i.pravatar.cc/150?img={}", self.id)
    }
}

/// Lightweight shape check: local part, one `@`, dotted domain, no spaces.
pub fn is_valid_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Identifier,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Identifier => LoginField::Password,
            LoginField::Password => LoginField::Identifier,
        }
    }
}

/// Login screen state. The backend accepts username or email as the
/// identifier, so only presence is validated locally.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    pub focus: LoginField,
    pub show_password: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn type_char(&mut self, c: char) {
        self.error = None;
        match self.focus {
            LoginField::Identifier => self.identifier.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            LoginField::Identifier => {
                self.identifier.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    pub fn validate(&mut self) -> bool {
        if self.identifier.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Please fill in all fields".to_string());
            return false;
        }
        self.error = None;
        true
    }

    pub fn reset(&mut self) {
        *self = LoginForm::default();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupField {
    #[default]
    Username,
    Email,
    Password,
}

impl SignupField {
    pub fn next(self) -> Self {
        match self {
            SignupField::Username => SignupField::Email,
            SignupField::Email => SignupField::Password,
            SignupField::Password => SignupField::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SignupField::Username => SignupField::Password,
            SignupField::Email => SignupField::Username,
            SignupField::Password => SignupField::Email,
        }
    }
}

/// First signup step: account basics with per-field validation.
#[derive(Clone, Debug, Default)]
pub struct BasicInfoForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: SignupField,
    pub show_password: bool,
    pub username_error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
}

impl BasicInfoForm {
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            SignupField::Username => {
                self.username.push(c);
                self.username_error = None;
            }
            SignupField::Email => {
                self.email.push(c);
                self.email_error = None;
            }
            SignupField::Password => {
                self.password.push(c);
                self.password_error = None;
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            SignupField::Username => {
                self.username.pop();
                self.username_error = None;
            }
            SignupField::Email => {
                self.email.pop();
                self.email_error = None;
            }
            SignupField::Password => {
                self.password.pop();
                self.password_error = None;
            }
        }
    }

    pub fn validate(&mut self) -> bool {
        self.username_error = (self.username.trim().chars().count() < MIN_USERNAME_LEN)
            .then(|| format!("Username must be at least {MIN_USERNAME_LEN} characters"));
        self.email_error =
            (!is_valid_email(&self.email)).then(|| "Please enter a valid email address".to_string());
        self.password_error = (self.password.chars().count() < MIN_PASSWORD_LEN)
            .then(|| format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
        self.username_error.is_none() && self.email_error.is_none() && self.password_error.is_none()
    }
}

/// Second signup step: pick 1 to 5 favorite genres from a fixed grid.
#[derive(Clone, Debug, Default)]
pub struct GenreSelection {
    pub cursor: usize,
    pub selected: Vec<&'static str>,
    pub error: Option<String>,
}

impl GenreSelection {
    pub fn move_cursor(&mut self, dcol: isize, drow: isize) {
        let cols = GENRE_GRID_COLS as isize;
        let len = GENRES.len() as isize;
        let next = self.cursor as isize + dcol + drow * cols;
        if (0..len).contains(&next) {
            self.cursor = next as usize;
        }
    }

    pub fn current(&self) -> Genre {
        GENRES[self.cursor.min(GENRES.len() - 1)]
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| *s == id)
    }

    /// Toggle the genre under the cursor, enforcing the selection cap.
    pub fn toggle_current(&mut self) {
        let id = self.current().id;
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            self.error = None;
        } else if self.selected.len() >= MAX_GENRES {
            self.error = Some(format!("You can select up to {MAX_GENRES} genres"));
        } else {
            self.selected.push(id);
            self.error = None;
        }
    }

    pub fn validate(&mut self) -> bool {
        if self.selected.len() < MIN_GENRES {
            self.error = Some("Please select at least one genre".to_string());
            return false;
        }
        self.error = None;
        true
    }
}

/// Third signup step: optional avatar. Skipping leaves the account without
/// a profile picture.
#[derive(Clone, Debug, Default)]
pub struct AvatarPicker {
    pub cursor: usize,
    pub chosen: Option<u8>,
}

impl AvatarPicker {
    pub fn move_cursor(&mut self, dcol: isize, drow: isize) {
        let cols = AVATAR_GRID_COLS as isize;
        let len = AVATARS.len() as isize;
        let next = self.cursor as isize + dcol + drow * cols;
        if (0..len).contains(&next) {
            self.cursor = next as usize;
        }
    }

    pub fn choose_current(&mut self) {
        self.chosen = Some(AVATARS[self.cursor.min(AVATARS.len() - 1)].id);
    }

    pub fn chosen_url(&self) -> Option<String> {
        let id = self.chosen?;
        AVATARS.iter().find(|a| a.id == id).map(Avatar::image_url)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupStep {
    #[default]
    BasicInfo,
    Genres,
    Avatar,
}

impl SignupStep {
    pub fn number(self) -> usize {
        match self {
            SignupStep::BasicInfo => 1,
            SignupStep::Genres => 2,
            SignupStep::Avatar => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SignupStep::BasicInfo => "Create your account",
            SignupStep::Genres => "What do you listen to?",
            SignupStep::Avatar => "Pick an avatar",
        }
    }
}

/// The whole three-step signup, advanced one validated step at a time.
#[derive(Clone, Debug, Default)]
pub struct SignupFlow {
    pub step: SignupStep,
    pub basic: BasicInfoForm,
    pub genres: GenreSelection,
    pub avatar: AvatarPicker,
    pub submitting: bool,
}

impl SignupFlow {
    /// Validate the current step and move forward. Returns true once the
    /// flow has passed the final step and is ready to submit.
    pub fn advance(&mut self) -> bool {
        match self.step {
            SignupStep::BasicInfo => {
                if self.basic.validate() {
                    self.step = SignupStep::Genres;
                }
                false
            }
            SignupStep::Genres => {
                if self.genres.validate() {
                    self.step = SignupStep::Avatar;
                }
                false
            }
            SignupStep::Avatar => true,
        }
    }

    /// Step back. Returns false when already on the first step, in which
    /// case the caller leaves the signup screen entirely.
    pub fn back(&mut self) -> bool {
        match self.step {
            SignupStep::BasicInfo => false,
            SignupStep::Genres => {
                self.step = SignupStep::BasicInfo;
                true
            }
            SignupStep::Avatar => {
                self.step = SignupStep::Genres;
                true
            }
        }
    }

    pub fn reset(&mut self) {
        *self = SignupFlow::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@example.c"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email("ada@@example.com"));
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert!(!form.validate());
        assert!(form.error.is_some());

        for c in "ada".chars() {
            form.type_char(c);
        }
        assert!(form.error.is_none());
        assert!(!form.validate());

        form.focus = LoginField::Password;
        for c in "secret".chars() {
            form.type_char(c);
        }
        assert!(form.validate());
        assert_eq!(form.identifier, "ada");
    }

    #[test]
    fn basic_info_validation_messages() {
        let mut form = BasicInfoForm {
            username: "ab".to_string(),
            email: "nope".to_string(),
            password: "12345".to_string(),
            ..BasicInfoForm::default()
        };
        assert!(!form.validate());
        assert_eq!(
            form.username_error.as_deref(),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            form.email_error.as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            form.password_error.as_deref(),
            Some("Password must be at least 6 characters")
        );

        form.username = "ada".to_string();
        form.email = "ada@example.com".to_string();
        form.password = "123456".to_string();
        assert!(form.validate());
        assert!(form.username_error.is_none());
    }

    #[test]
    fn typing_clears_only_the_focused_field_error() {
        let mut form = BasicInfoForm::default();
        form.validate();
        assert!(form.username_error.is_some());
        assert!(form.email_error.is_some());

        form.focus = SignupField::Username;
        form.type_char('a');
        assert!(form.username_error.is_none());
        assert!(form.email_error.is_some());
    }

    #[test]
    fn genre_selection_caps_at_five() {
        let mut sel = GenreSelection::default();
        for i in 0..MAX_GENRES {
            sel.cursor = i;
            sel.toggle_current();
        }
        assert_eq!(sel.selected.len(), MAX_GENRES);
        assert!(sel.error.is_none());

        sel.cursor = MAX_GENRES;
        sel.toggle_current();
        assert_eq!(sel.selected.len(), MAX_GENRES);
        assert_eq!(sel.error.as_deref(), Some("You can select up to 5 genres"));

        // Untoggling is always allowed and clears the complaint.
        sel.cursor = 0;
        sel.toggle_current();
        assert_eq!(sel.selected.len(), MAX_GENRES - 1);
        assert!(sel.error.is_none());
    }

    #[test]
    fn genre_selection_requires_at_least_one() {
        let mut sel = GenreSelection::default();
        assert!(!sel.validate());
        assert_eq!(sel.error.as_deref(), Some("Please select at least one genre"));
        sel.toggle_current();
        assert!(sel.validate());
    }

    #[test]
    fn grid_cursor_stays_in_bounds() {
        let mut sel = GenreSelection::default();
        sel.move_cursor(-1, 0);
        assert_eq!(sel.cursor, 0);
        sel.move_cursor(0, -1);
        assert_eq!(sel.cursor, 0);
        sel.move_cursor(1, 0);
        assert_eq!(sel.cursor, 1);
        sel.move_cursor(0, 1);
        assert_eq!(sel.cursor, 1 + GENRE_GRID_COLS);
        sel.cursor = GENRES.len() - 1;
        sel.move_cursor(0, 1);
        assert_eq!(sel.cursor, GENRES.len() - 1);
    }

    #[test]
    fn avatar_skip_leaves_no_url() {
        let mut picker = AvatarPicker::default();
        assert!(picker.chosen_url().is_none());
        picker.cursor = 2;
        picker.choose_current();
        assert_eq!(
            picker.chosen_url().as_deref(),
            Some("https://i.pravatar.cc/150?img=3")
        );
    }

    #[test]
    fn signup_flow_gates_each_step() {
        let mut flow = SignupFlow::default();
        assert!(!flow.advance());
        assert_eq!(flow.step, SignupStep::BasicInfo);

        flow.basic.username = "ada".to_string();
        flow.basic.email = "ada@example.com".to_string();
        flow.basic.password = "123456".to_string();
        assert!(!flow.advance());
        assert_eq!(flow.step, SignupStep::Genres);

        assert!(!flow.advance());
        assert_eq!(flow.step, SignupStep::Genres);
        flow.genres.toggle_current();
        assert!(!flow.advance());
        assert_eq!(flow.step, SignupStep::Avatar);

        // Final step submits whether or not an avatar was chosen.
        assert!(flow.advance());

        assert!(flow.back());
        assert_eq!(flow.step, SignupStep::Genres);
        assert!(flow.back());
        assert!(!flow.back());
    }
}
