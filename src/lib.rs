pub mod shared {
    pub mod core {
        pub mod calendar_date;
        pub mod flow_outcome;
        pub mod time_of_day;
        pub mod user_facing_error;
    }
    pub mod infrastructure {
        pub mod http_api;
        pub mod notifications;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod entry_fields;
            pub mod record;
            pub mod search_criteria;
        }
        pub mod use_cases {
            pub mod synchronize_records {
                pub mod api_port;
                pub mod store;
            }
            pub mod browse_records {
                pub mod dialogs_port;
                pub mod view;
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod scripted_dialogs;
            }
            pub mod outbound {
                pub mod attendance_api_http;
                pub mod attendance_api_in_memory;
            }
        }
    }
    pub mod personal_info {
        pub mod core {
            pub mod profile;
        }
        pub mod use_cases {
            pub mod manage_profile {
                pub mod api_port;
                pub mod service;
                pub mod view;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod personal_info_api_http;
                pub mod personal_info_api_in_memory;
            }
        }
    }
}

pub mod shell;
