//! Bundle Event

#[derive(Debug, Clone)]
pub enum BundleEvent {
	// -- Preamble Events
	LicenseIncluded {
		lines: usize,
	},
	HeaderIncluded,

	// -- Fragment Events
	FragmentBundled {
		file_name: String,
		bytes: u64,
	},

	// -- Artifact Events
	ArtifactWritten {
		path: String,
		bytes: u64,
	},
}
