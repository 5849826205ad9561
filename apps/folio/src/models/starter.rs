use std::sync::Arc;

use crate::models::document::{About, ColorScheme, Contact, Hero, PortfolioDocument, Theme};
use crate::models::entries::{
    Certification, Education, Experience, Project, Skill, Strength,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PortfolioDocument {
    /// The sample portfolio a new user starts editing from.
    pub fn starter() -> Self {
        Self {
            hero: Arc::new(Hero {
                full_name: "Alex Rivera".into(),
                tagline: "Full Stack Developer & Creative Problem Solver".into(),
                short_bio: "Building innovative web experiences that make a difference".into(),
                photo: String::new(),
                hero_background: String::new(),
            }),
            about: Arc::new(About {
                headline: "About Me".into(),
                story: "I'm a passionate developer with 5+ years of experience crafting \
                        beautiful, functional web applications. My journey started with a \
                        curiosity about how things work, and evolved into a love for creating \
                        digital experiences that users enjoy. I specialize in full-stack \
                        development, with a focus on modern frameworks and scalable \
                        architectures."
                    .into(),
                strengths: vec![
                    strength(
                        "1",
                        "Problem Solving",
                        "Breaking down complex challenges into elegant solutions",
                    ),
                    strength(
                        "2",
                        "Team Leadership",
                        "Mentoring developers and fostering collaborative environments",
                    ),
                    strength(
                        "3",
                        "Innovation",
                        "Always exploring new technologies and best practices",
                    ),
                ],
            }),
            skills: Arc::new(vec![
                skill("1", "React", 90, "Frontend"),
                skill("2", "Node.js", 85, "Backend"),
                skill("3", "TypeScript", 80, "Languages"),
                skill("4", "Python", 75, "Languages"),
                skill("5", "MongoDB", 70, "Database"),
                skill("6", "AWS", 65, "DevOps"),
            ]),
            projects: Arc::new(vec![
                Project {
                    id: "1".into(),
                    title: "E-Commerce Platform".into(),
                    description: "Built a full-featured e-commerce platform with payment \
                                  integration, inventory management, and admin dashboard."
                        .into(),
                    technologies: strings(&["React", "Node.js", "MongoDB", "Stripe"]),
                    images: Vec::new(),
                    github_link: "https://github.com/johndoe/ecommerce".into(),
                    live_link: "https://demo.example.com".into(),
                    featured: true,
                },
                Project {
                    id: "2".into(),
                    title: "Task Management App".into(),
                    description: "Developed a collaborative task management tool with \
                                  real-time updates and team features."
                        .into(),
                    technologies: strings(&["React", "Firebase", "Tailwind CSS"]),
                    images: Vec::new(),
                    github_link: "https://github.com/johndoe/taskapp".into(),
                    live_link: String::new(),
                    featured: false,
                },
            ]),
            experience: Arc::new(vec![
                Experience {
                    id: "1".into(),
                    job_title: "Senior Full Stack Developer".into(),
                    company: "Tech Innovations Inc.".into(),
                    location: "San Francisco, CA".into(),
                    start_date: "2021".into(),
                    end_date: "Present".into(),
                    description: "Leading development of core platform features, mentoring \
                                  junior developers, and architecting scalable solutions."
                        .into(),
                    responsibilities: strings(&[
                        "Led team of 5 developers in building customer-facing features",
                        "Architected microservices infrastructure using Node.js and Docker",
                        "Implemented CI/CD pipelines reducing deployment time by 60%",
                    ]),
                },
                Experience {
                    id: "2".into(),
                    job_title: "Full Stack Developer".into(),
                    company: "StartupXYZ".into(),
                    location: "Remote".into(),
                    start_date: "2019".into(),
                    end_date: "2021".into(),
                    description: "Built responsive web applications from concept to \
                                  deployment."
                        .into(),
                    responsibilities: strings(&[
                        "Developed RESTful APIs serving 100k+ daily active users",
                        "Optimized database queries improving response time by 50%",
                    ]),
                },
            ]),
            education: Arc::new(vec![Education {
                id: "1".into(),
                degree: "Bachelor of Science in Computer Science".into(),
                school: "University of Technology".into(),
                location: "Boston, MA".into(),
                year: "2019".into(),
                description: "Graduated with honors. Specialized in software engineering, \
                              algorithms, and distributed systems."
                    .into(),
                achievements: strings(&["GPA: 3.8/4.0", "Dean's List all semesters"]),
            }]),
            certifications: Arc::new(vec![Certification {
                id: "1".into(),
                name: "AWS Certified Solutions Architect".into(),
                issuer: "Amazon Web Services".into(),
                date: "2023".into(),
                credential_id: "AWS-12345".into(),
                url: "https://aws.amazon.com/verification".into(),
                description: "Professional level certification for designing distributed \
                              systems on AWS"
                    .into(),
            }]),
            contact: Arc::new(Contact {
                email: "alex.rivera@example.com".into(),
                phone: "+1 (555) 123-4567".into(),
                location: "San Francisco, CA".into(),
                github: "https://github.com/alexrivera".into(),
                linkedin: "https://linkedin.com/in/alexrivera".into(),
                twitter: "https://twitter.com/alexrivera".into(),
                website: "https://alexrivera.dev".into(),
                message: "Let's build something amazing together! Feel free to reach out for \
                          collaborations or opportunities."
                    .into(),
            }),
            color_scheme: Arc::new(ColorScheme::default()),
            theme: Theme::Light,
        }
    }
}

fn strength(id: &str, title: &str, description: &str) -> Strength {
    Strength {
        id: id.into(),
        title: title.into(),
        description: description.into(),
    }
}

fn skill(id: &str, name: &str, level: u8, category: &str) -> Skill {
    Skill {
        id: id.into(),
        name: name.into(),
        level,
        category: category.into(),
    }
}
