pub mod helpdesk;

pub use helpdesk::HelpdeskService;
