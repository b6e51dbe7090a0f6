//! .NET stack, signalled by project, solution or C# source files

use super::ManifestContext;
use crate::detection::{StackName, TechStackEntry};

pub const EXTENSIONS: &[&str] = &["csproj", "fsproj", "sln", "cs"];

pub fn build(_ctx: &ManifestContext<'_>) -> TechStackEntry {
    TechStackEntry::new(StackName::DotNet).with_build_tool("dotnet")
}
