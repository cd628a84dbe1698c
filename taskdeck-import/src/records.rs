/// CSV row types and readers
///
/// One record type per entity CSV, deserialized by header name. The task
/// export carries a `created_at` column; it is parsed for completeness but
/// the store assigns its own timestamps on insert.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

use crate::importer::ImportError;

/// Default file name of the users export
pub const USERS_FILE: &str = "Task Manager - Users_Projects_Tasks - Users.csv";

/// Default file name of the projects export
pub const PROJECTS_FILE: &str = "Task Manager - Users_Projects_Tasks - Projects.csv";

/// Default file name of the tasks export
pub const TASKS_FILE: &str = "Task Manager - Users_Projects_Tasks - Tasks.csv";

/// Row of the users CSV
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Row of the projects CSV
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub order: i32,
}

/// Row of the tasks CSV
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub order: i32,
}

/// Reads all records of one CSV, failing on the first malformed row.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, ImportError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_user_records() {
        let data = "id,name,email,password\n1,John,john@example.com,secret\n";
        let users: Vec<UserRecord> = read_records(data.as_bytes()).unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "John");
        assert_eq!(users[0].email, "john@example.com");
    }

    #[test]
    fn test_read_task_records_keeps_order_column() {
        let data = "id,title,description,created_at,order\n\
                    1,Fix login,Broken redirect,2024-01-01,2\n";
        let tasks: Vec<TaskRecord> = read_records(data.as_bytes()).unwrap();

        assert_eq!(tasks[0].order, 2);
        assert_eq!(tasks[0].created_at, "2024-01-01");
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let data = "id,name,email,password\nnot-a-number,John,j@x.com,pw\n";
        let result: Result<Vec<UserRecord>, _> = read_records(data.as_bytes());

        assert!(result.is_err());
    }
}
