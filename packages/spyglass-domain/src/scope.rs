/// Logical category of content being searched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// Object-level indices only.
	File,
	/// Package-manifest indices only.
	Package,
	/// Both index families.
	Global,
}

impl Scope {
	/// Parses a caller-supplied scope label. Anything outside the three known
	/// values is rejected before index-pattern construction.
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"file" => Some(Self::File),
			"package" => Some(Self::Package),
			"global" => Some(Self::Global),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::File => "file",
			Self::Package => "package",
			Self::Global => "global",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_known_scopes() {
		assert_eq!(Scope::parse("file"), Some(Scope::File));
		assert_eq!(Scope::parse(" Package "), Some(Scope::Package));
		assert_eq!(Scope::parse("GLOBAL"), Some(Scope::Global));
	}

	#[test]
	fn rejects_unknown_scopes() {
		assert_eq!(Scope::parse("files"), None);
		assert_eq!(Scope::parse(""), None);
		assert_eq!(Scope::parse("all"), None);
	}
}
