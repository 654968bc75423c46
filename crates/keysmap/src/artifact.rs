//! Artifact coordinates: the (group, artifact, version, classifier, type)
//! tuple identifying a distributable unit.

use std::fmt;

/// Immutable coordinates of one artifact, produced per query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    group: String,
    artifact: String,
    version: String,
    classifier: Option<String>,
    kind: Option<String>,
}

impl ArtifactCoordinate {
    /// Create coordinates without classifier or type.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            classifier: None,
            kind: None,
        }
    }

    /// Start building coordinates for the given group.
    pub fn builder(group: impl Into<String>) -> ArtifactCoordinateBuilder {
        ArtifactCoordinateBuilder {
            inner: Self::new(group, "", ""),
        }
    }

    /// Parse `group:artifact:version[:classifier[:type]]`.
    ///
    /// Missing trailing fields stay empty (artifact, version) or absent
    /// (classifier, type). Empty classifier or type fields count as absent.
    pub fn parse(coords: &str) -> Self {
        let mut parts = coords.trim().split(':').map(str::trim);
        let group = parts.next().unwrap_or_default();
        let mut builder = Self::builder(group)
            .artifact(parts.next().unwrap_or_default())
            .version(parts.next().unwrap_or_default());
        if let Some(classifier) = parts.next().filter(|c| !c.is_empty()) {
            builder = builder.classifier(classifier);
        }
        if let Some(kind) = parts.next().filter(|t| !t.is_empty()) {
            builder = builder.kind(kind);
        }
        builder.build()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Packaging type (`jar`, `pom`, ...).
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        match (&self.classifier, &self.kind) {
            (Some(c), Some(t)) => write!(f, ":{c}:{t}"),
            (Some(c), None) => write!(f, ":{c}"),
            (None, Some(t)) => write!(f, "::{t}"),
            (None, None) => Ok(()),
        }
    }
}

/// Builder for [`ArtifactCoordinate`].
#[derive(Debug, Clone)]
pub struct ArtifactCoordinateBuilder {
    inner: ArtifactCoordinate,
}

impl ArtifactCoordinateBuilder {
    pub fn artifact(mut self, artifact: impl Into<String>) -> Self {
        self.inner.artifact = artifact.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner.version = version.into();
        self
    }

    pub fn classifier(mut self, classifier: impl Into<String>) -> Self {
        self.inner.classifier = Some(classifier.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.inner.kind = Some(kind.into());
        self
    }

    pub fn build(self) -> ArtifactCoordinate {
        self.inner
    }
}
