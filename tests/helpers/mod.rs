pub mod fake_sender;
