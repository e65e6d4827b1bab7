use std::fmt;

/// The admin panel's sidebar sections. Exactly one is active at a time;
/// switching sections tears down the previous section's live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Products,
    Blogs,
    Careers,
    CustomerInquiries,
    Quotations,
    JobApplications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Products,
        Section::Blogs,
        Section::Careers,
        Section::CustomerInquiries,
        Section::Quotations,
        Section::JobApplications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Products => "Products",
            Section::Blogs => "Blogs",
            Section::Careers => "Careers",
            Section::CustomerInquiries => "Customer Inquiries",
            Section::Quotations => "Quotations",
            Section::JobApplications => "Job Applications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
