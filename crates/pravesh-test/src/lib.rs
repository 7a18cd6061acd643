//! Admission record service - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through `pravesh_test::` paths.

pub mod component {
    pub mod constants {
        pub use pravesh_core::constants::*;
    }

    pub mod form {
        pub use pravesh_core::form::*;
    }

    // Config from both core and app
    pub mod config {
        pub use pravesh_app::config::ConfigHandler;
        pub use pravesh_core::config::*;
    }

    pub mod db {
        pub use pravesh_db::db::*;

        // Additional db handler from app
        pub mod connection {
            pub use pravesh_app::db_handler::DbProviderHandler;
            pub use pravesh_db::db::connection::*;
        }
    }

    pub mod model {
        pub use pravesh_db::model::*;
    }

    pub mod service {
        pub use pravesh_service::*;
    }
}

pub mod app {
    pub use pravesh_app::*;

    pub mod api {
        pub use pravesh_app::app::api::*;
    }
}
