use salvo::prelude::*;

pub const REQUESTED_WITH: &str = "x-requested-with";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// How a response to an editor form is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// A browser navigation: HTML page, redirect after success.
    Page,
    /// A script call: JSON payload carrying rendered fragments.
    Fragment,
}

impl ResponseMode {
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case(XML_HTTP_REQUEST) => ResponseMode::Fragment,
            _ => ResponseMode::Page,
        }
    }

    pub fn of(req: &Request) -> Self {
        Self::from_header(req.header::<String>(REQUESTED_WITH).as_deref())
    }
}
