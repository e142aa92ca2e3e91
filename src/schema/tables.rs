//! Table definitions sent to the `create_*_table` procedures.
//!
//! Every statement uses `IF NOT EXISTS`, so re-running initialization against
//! an already provisioned database is a no-op.

use super::TableDefinition;

pub const USERS: TableDefinition = TableDefinition {
    table: "users",
    label: "Users",
    rpc: "create_users_table",
    depends_on: &[],
    sql: r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('admin', 'manager', 'employee')),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};

pub const EMPLOYEES: TableDefinition = TableDefinition {
    table: "employees",
    label: "Employees",
    rpc: "create_employees_table",
    depends_on: &["users"],
    sql: r#"
CREATE TABLE IF NOT EXISTS employees (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    employee_code TEXT UNIQUE NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    department TEXT NOT NULL,
    position TEXT NOT NULL,
    hire_date DATE NOT NULL,
    status TEXT DEFAULT 'Active',
    annual_leave_balance INTEGER DEFAULT 21,
    manager_id UUID REFERENCES employees(id),
    user_id UUID REFERENCES users(id),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};

pub const LEAVES: TableDefinition = TableDefinition {
    table: "leaves",
    label: "Leaves",
    rpc: "create_leaves_table",
    depends_on: &["employees"],
    sql: r#"
CREATE TABLE IF NOT EXISTS leaves (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    employee_id UUID REFERENCES employees(id),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    days DECIMAL(4,1) NOT NULL,
    type TEXT NOT NULL,
    reason TEXT,
    status TEXT DEFAULT 'Pending',
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};

pub const EXCUSES: TableDefinition = TableDefinition {
    table: "excuses",
    label: "Excuses",
    rpc: "create_excuses_table",
    depends_on: &["employees"],
    sql: r#"
CREATE TABLE IF NOT EXISTS excuses (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    employee_id UUID REFERENCES employees(id),
    date DATE NOT NULL,
    time_from TIME NOT NULL,
    time_to TIME NOT NULL,
    reason TEXT NOT NULL,
    status TEXT DEFAULT 'Pending',
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};

pub const OVERTIME: TableDefinition = TableDefinition {
    table: "overtime",
    label: "Overtime",
    rpc: "create_overtime_table",
    depends_on: &["employees"],
    sql: r#"
CREATE TABLE IF NOT EXISTS overtime (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    employee_id UUID REFERENCES employees(id),
    date DATE NOT NULL,
    hours DECIMAL(4,1) NOT NULL,
    reason TEXT NOT NULL,
    status TEXT DEFAULT 'Pending',
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};

pub const SALARY: TableDefinition = TableDefinition {
    table: "salary",
    label: "Salary",
    rpc: "create_salary_table",
    depends_on: &["employees"],
    sql: r#"
CREATE TABLE IF NOT EXISTS salary (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    employee_id UUID REFERENCES employees(id),
    basic_salary DECIMAL(10,2) NOT NULL,
    housing_allowance DECIMAL(10,2) DEFAULT 0,
    transportation_allowance DECIMAL(10,2) DEFAULT 0,
    other_allowances DECIMAL(10,2) DEFAULT 0,
    effective_date DATE NOT NULL,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT timezone('utc'::text, now())
);
"#,
};
