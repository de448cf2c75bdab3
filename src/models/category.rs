#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "exp" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const DEFAULT_COLOR: &str = "#5AC8FA";
pub const DEFAULT_ICON: &str = "tag";
pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_COLOR: &str = "#cccccc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(id: String, name: String, kind: CategoryKind) -> Self {
        Self {
            id,
            name,
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
            kind,
        }
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Resolve an id against `categories`, keeping dangling references as
    /// [`CategoryRef::Unknown`].
    pub fn lookup<'a>(categories: &'a [Category], id: &'a str) -> CategoryRef<'a> {
        match Self::find_by_id(categories, id) {
            Some(category) => CategoryRef::Known(category),
            None => CategoryRef::Unknown(id),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Result of resolving a category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    Known(&'a Category),
    Unknown(&'a str),
}

impl<'a> CategoryRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Self::Known(c) => &c.id,
            Self::Unknown(id) => id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Known(c) => &c.name,
            Self::Unknown(_) => UNKNOWN_NAME,
        }
    }

    pub fn color(&self) -> &'a str {
        match self {
            Self::Known(c) => &c.color,
            Self::Unknown(_) => UNKNOWN_COLOR,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// The category set a fresh ledger starts with.
pub fn default_categories() -> Vec<Category> {
    use CategoryKind::{Expense, Income};

    [
        ("salary", "Salary", "#34C759", "briefcase", Income),
        ("investment", "Investment", "#AF52DE", "trending-up", Income),
        ("other_income", "Other Income", "#5AC8FA", "plus-circle", Income),
        ("housing", "Housing", "#007AFF", "home", Expense),
        ("food", "Food", "#FFCC00", "utensils", Expense),
        ("transportation", "Transportation", "#FF2D55", "car", Expense),
        ("utilities", "Utilities", "#5856D6", "zap", Expense),
        ("entertainment", "Entertainment", "#FF9500", "film", Expense),
        ("shopping", "Shopping", "#FF3B30", "shopping-bag", Expense),
        ("health", "Health", "#4CD964", "activity", Expense),
        ("education", "Education", "#5AC8FA", "book", Expense),
        ("other_expense", "Other", "#8E8E93", "more-horizontal", Expense),
    ]
    .into_iter()
    .map(|(id, name, color, icon, kind)| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        kind,
    })
    .collect()
}
