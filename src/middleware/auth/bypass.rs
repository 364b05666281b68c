/// Paths served without authentication.
///
/// Matching is exact: no prefixes, no trailing-slash normalisation.
/// Order of insertion is kept and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BypassList {
    paths: Vec<String>,
}

impl BypassList {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut list = Self::default();
        for path in paths {
            let path = path.into();
            if !list.contains(&path) {
                list.paths.push(path);
            }
        }
        list
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

}

impl<P: Into<String>> FromIterator<P> for BypassList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}
