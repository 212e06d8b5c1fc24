pub mod syllabus_text;
