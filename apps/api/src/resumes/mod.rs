// Resume intake: save/list JSON resumes, upload PDF files, parse uploads to text.

pub mod handlers;
