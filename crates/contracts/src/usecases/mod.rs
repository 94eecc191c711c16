pub mod u001_category_assignment;
