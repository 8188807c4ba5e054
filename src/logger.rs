/// Error reporting for failures that are hidden from the caller.
pub struct Logger {
    message: String,
}

impl Logger {
    pub fn new(message: String) -> Self {
        Logger { message }
    }

    pub fn log(&self) {
        tracing::error!(target: "invoice_dashboard", "{}", self.message);
    }
}
