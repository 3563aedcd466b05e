use init::server_init::server_init_proc;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// modules tree
pub mod docs;
pub mod schema;
pub mod domain {
    pub mod auth {
        pub mod admin_user;
    }
    pub mod blog {
        #[allow(clippy::module_inception)]
        pub mod blog;
        pub mod slug;
    }
    pub mod career;
    pub mod contact;
    pub mod dashboard;
    pub mod domain_traits;
    pub mod event;
    pub mod filter;
    pub mod partner;
    pub mod project;
    pub mod screenshot;
}
pub mod dto {
    pub mod requests {
        pub mod auth {
            pub mod login_request;
        }
        pub mod blog {
            pub mod get_posts_request;
            pub mod screenshot_request;
            pub mod submit_post_request;
        }
        pub mod career {
            pub mod career_request;
        }
        pub mod contact {
            pub mod contact_request;
        }
        pub mod event {
            pub mod event_request;
        }
        pub mod partner {
            pub mod partner_request;
        }
        pub mod project {
            pub mod project_request;
        }
    }
    pub mod responses {
        pub mod auth {
            pub mod login_response;
            pub mod logout_response;
            pub mod me_response;
        }
        pub mod project {
            pub mod featured_projects_response;
        }
        pub mod delete_response;
        pub mod response_data;
        pub mod response_meta;
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod admin {
        pub mod blog;
        pub mod careers;
        pub mod contact;
        pub mod events;
        pub mod get_stats;
        pub mod partners;
        pub mod projects;
        pub mod screenshots;
    }
    pub mod auth {
        pub mod login;
        pub mod logout;
        pub mod me;
        pub mod session_cookie;
    }
    pub mod blog {
        pub mod delete_post;
        pub mod get_posts;
        pub mod read_post;
        pub mod related_posts;
        pub mod save_error;
        pub mod submit_post;
        pub mod update_post;
    }
    pub mod career {
        pub mod get_careers;
        pub mod submit_career;
    }
    pub mod contact {
        pub mod submit_contact;
    }
    pub mod event {
        pub mod upcoming_events;
    }
    pub mod partner {
        pub mod get_partners;
    }
    pub mod project {
        pub mod featured_projects;
        pub mod get_projects;
        pub mod read_project;
    }
    pub mod server {
        pub mod fallback;
        pub mod healthcheck;
    }
    pub mod degrade;
    #[cfg(test)]
    pub mod test_support;
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod is_logged_in;
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod server_init;
    pub mod state;
}
pub mod jobs {
    pub mod auth {
        pub mod purge_expired_sessions;
    }
    pub mod job_funcs {
        pub mod every_minute;
        pub mod init_scheduler;
    }
}
pub mod store;
pub mod util {
    pub mod crypto {
        pub mod hash_pw;
        pub mod verify_pw;
    }
    pub mod string {
        pub mod generate_slug;
    }
    pub mod time {
        pub mod duration_formatter;
        pub mod now;
    }
    pub mod validation {
        pub mod fields;
    }
}

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    server_init_proc(start).await?;

    Ok(())
}
