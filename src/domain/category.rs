// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde::{Deserialize, Serialize};

/// File categories of the upstream repository, declared in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OpenapiSpecs,
    Controllers,
    Models,
    ApiExamples,
    Services,
    ProtoFiles,
    GrpcClients,
    Repositories,
    DatabaseMigrations,
    Configuration,
    Tests,
    BuildFiles,
    SharedLibraries,
    Ignored,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Self::OpenapiSpecs,
        Self::Controllers,
        Self::Models,
        Self::ApiExamples,
        Self::Services,
        Self::ProtoFiles,
        Self::GrpcClients,
        Self::Repositories,
        Self::DatabaseMigrations,
        Self::Configuration,
        Self::Tests,
        Self::BuildFiles,
        Self::SharedLibraries,
        Self::Ignored,
    ];

    /// Categories whose changes may require SDK work, most important first.
    pub const SDK_RELEVANT: [Category; 4] = [
        Self::OpenapiSpecs,
        Self::Controllers,
        Self::Models,
        Self::ApiExamples,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenapiSpecs => "openapi_specs",
            Self::Controllers => "controllers",
            Self::Models => "models",
            Self::ApiExamples => "api_examples",
            Self::Services => "services",
            Self::ProtoFiles => "proto_files",
            Self::GrpcClients => "grpc_clients",
            Self::Repositories => "repositories",
            Self::DatabaseMigrations => "database_migrations",
            Self::Configuration => "configuration",
            Self::Tests => "tests",
            Self::BuildFiles => "build_files",
            Self::SharedLibraries => "shared_libraries",
            Self::Ignored => "ignored",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Heading form used in reports, e.g. "Openapi Specs".
    pub fn title(&self) -> &'static str {
        match self {
            Self::OpenapiSpecs => "Openapi Specs",
            Self::Controllers => "Controllers",
            Self::Models => "Models",
            Self::ApiExamples => "Api Examples",
            Self::Services => "Services",
            Self::ProtoFiles => "Proto Files",
            Self::GrpcClients => "Grpc Clients",
            Self::Repositories => "Repositories",
            Self::DatabaseMigrations => "Database Migrations",
            Self::Configuration => "Configuration",
            Self::Tests => "Tests",
            Self::BuildFiles => "Build Files",
            Self::SharedLibraries => "Shared Libraries",
            Self::Ignored => "Ignored",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.title() == title)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::OpenapiSpecs => "OpenAPI specifications - CRITICAL for Python SDK generation",
            Self::Controllers => "REST API endpoint definitions",
            Self::Models => "Data transfer objects and request/response models",
            Self::ApiExamples => "API request/response examples for SDK testing",
            Self::Services => "Business logic and service implementations",
            Self::ProtoFiles => "gRPC protocol buffer definitions",
            Self::GrpcClients => "gRPC client library implementations",
            Self::Repositories => "Data access layer and database operations",
            Self::DatabaseMigrations => "Liquibase database schema changes",
            Self::Configuration => "Application and OpenAPI configuration",
            Self::Tests => "Unit and integration tests",
            Self::BuildFiles => "Gradle build configuration",
            Self::SharedLibraries => "Shared utility libraries",
            Self::Ignored => "Files not relevant for SDK implementation",
        }
    }

    /// Lower is more important. Ties keep declaration order.
    pub fn priority(&self) -> u8 {
        match self {
            Self::OpenapiSpecs => 0,
            Self::Controllers => 1,
            Self::Models | Self::ApiExamples | Self::ProtoFiles => 2,
            Self::Services | Self::DatabaseMigrations => 3,
            Self::GrpcClients | Self::Repositories => 4,
            Self::Configuration | Self::SharedLibraries => 5,
            Self::Tests => 6,
            Self::BuildFiles => 7,
            Self::Ignored => 99,
        }
    }

    pub fn sdk_relevant(&self) -> bool {
        Self::SDK_RELEVANT.contains(self)
    }

    /// OpenAPI changes force client regeneration; everything else is a review item.
    pub fn is_critical(&self) -> bool {
        *self == Self::OpenapiSpecs
    }

    pub fn marker(&self) -> &'static str {
        if self.is_critical() { "🔴" } else { "🟡" }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable sort by priority, preserving the input order for ties.
pub fn sort_by_priority(categories: &mut [Category]) {
    categories.sort_by_key(|c| c.priority());
}
