use log::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub host_only: bool,
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: &str, value: &str, domain: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: path.to_string(),
            host_only: true,
            http_only: false,
        }
    }

    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    fn matches_domain(&self, host: &str) -> bool {
        if self.domain.eq_ignore_ascii_case(host) {
            return true;
        }

        !self.host_only
            && host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", self.domain.to_ascii_lowercase()))
    }

    fn matches_path(&self, request_path: &str) -> bool {
        if request_path == self.path {
            return true;
        }

        request_path.starts_with(&self.path)
            && (self.path.ends_with('/') || request_path[self.path.len()..].starts_with('/'))
    }

    /// Browser serialization: a cookie without name is sent as its bare value.
    fn pair(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }
}

/// Cookies of a modem session.
///
/// Entries are keyed by (name, domain, path) like a browser store, so
/// several cookies may share a name on different paths.
#[derive(Clone, Debug, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Inserts `cookie`, replacing the entry with the same name, domain and path.
    pub fn set(&mut self, cookie: Cookie) {
        match self.cookies.iter_mut().find(|c| {
            c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path
        }) {
            Some(existing) => *existing = cookie,
            None => self.cookies.push(cookie),
        }
    }

    /// Removes the cookie at exactly (domain, path, name); returns whether one existed.
    pub fn remove(&mut self, domain: &str, path: &str, name: &str) -> bool {
        let before = self.cookies.len();
        self.cookies
            .retain(|c| !(c.domain == domain && c.path == path && c.name == name));
        before != self.cookies.len()
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `Cookie` header value for a request to `host` at `request_path`,
    /// longest paths first.
    pub fn header_for(&self, host: &str, request_path: &str) -> Option<String> {
        let mut matching: Vec<&Cookie> = self
            .cookies
            .iter()
            .filter(|c| c.matches_domain(host) && c.matches_path(request_path))
            .collect();

        if matching.is_empty() {
            return None;
        }

        matching.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        Some(
            matching
                .iter()
                .map(|c| c.pair())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Stores a `Set-Cookie` header received from `host` for `request_path`.
    ///
    /// A first segment without `=` is read as a name with an empty value,
    /// the way Python's cookie jar reads it; browsers read it as a value
    /// with an empty name.
    pub fn store_set_cookie(&mut self, header: &str, host: &str, request_path: &str) {
        let mut segments = header.split(';').map(str::trim);

        let (name, value) = match segments.next() {
            Some(first) if !first.is_empty() => match first.split_once('=') {
                Some((n, v)) => (n.trim(), v.trim().trim_matches('"')),
                None => (first, ""),
            },
            _ => return,
        };

        let mut cookie = Cookie::new(name, value, host, &default_path(request_path));
        let mut expired = false;

        for attribute in segments {
            let (key, val) = match attribute.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (attribute, ""),
            };

            match key.to_ascii_lowercase().as_str() {
                "path" if val.starts_with('/') => cookie.path = val.to_string(),
                "domain" if !val.is_empty() => {
                    cookie.domain = val.trim_start_matches('.').to_string();
                    cookie.host_only = false;
                }
                "httponly" => cookie.http_only = true,
                "max-age" => expired = val.parse::<i64>().map(|v| v <= 0).unwrap_or(false),
                _ => {}
            }
        }

        if expired {
            debug!("server expired cookie {}", cookie.name);
            self.remove(&cookie.domain, &cookie.path, &cookie.name);
            return;
        }

        debug!("server set cookie {} at {}", cookie.name, cookie.path);
        self.set(cookie);
    }
}

/// Default cookie path of RFC 6265: the request path up to its last `/`.
fn default_path(request_path: &str) -> String {
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => request_path[..i].to_string(),
    }
}
