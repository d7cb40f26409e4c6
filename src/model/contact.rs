/// A contact form submission that passed the relay's checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn subject(&self) -> String {
        format!("New contact from {}", self.name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    pub fn html_body(&self) -> String {
        let message = html_escape::encode_text(&self.message).replace('\n', "<br/>");
        format!(
            "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p><p><strong>Message:</strong><br/>{}</p>",
            html_escape::encode_text(&self.name),
            html_escape::encode_text(&self.email),
            message
        )
    }
}
