pub mod shared {
    pub mod infrastructure {
        pub mod connectors;
    }
}

pub mod shell;
