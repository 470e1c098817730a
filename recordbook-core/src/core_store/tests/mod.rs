/*
    Scenario tests for the core_store subsystem

    Test suite covering:
    - Record lifecycle (create, read, update, delete)
    - Creator-based access control and policy variants
    - Keyword search scope
    - Persistence through the snapshot backend
    - Properties over generated payloads and callers
*/

pub mod search_tests;
